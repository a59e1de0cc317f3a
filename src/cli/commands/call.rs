//! Invoke a channel method from the command line

use serde_json::Value;

use crate::channel::{MethodCall, MethodChannel};
use crate::cli::args::CallArgs;
use crate::error::{CacheError, Result};
use crate::fs::FileSystem;
use crate::output::json::format_json;

/// Run one method call and print its response envelope
///
/// The envelope is the result: a failed or unknown method still exits 0
/// and is reported through its `status` field.
pub fn call<F: FileSystem>(channel: &MethodChannel<F>, args: &CallArgs) -> Result<String> {
    let arguments = match &args.args {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| CacheError::InvalidArgument(format!("--args is not valid JSON: {}", e)))?,
        None => Value::Null,
    };

    let call = MethodCall {
        method: args.method.clone(),
        arguments,
    };
    format_json(&channel.handle(&call))
}
