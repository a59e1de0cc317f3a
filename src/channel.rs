//! Method-call envelope for the application shell
//!
//! A caller sends a method name, gets back exactly one of: a success value,
//! an error with a code, or "not implemented". Unknown methods always get
//! `NotImplemented`, never an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::DirectoryCacheService;
use crate::error::CacheError;
use crate::fs::FileSystem;
use crate::platform::PlatformInfo;

/// Channel name the shell addresses these methods on
pub const CHANNEL_NAME: &str = "plato_jobs_cache_manager";

/// Code used when a request cannot be decoded
pub const INVALID_CALL: &str = "INVALID_CALL";

/// An incoming call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Value::Null,
        }
    }
}

/// Outcome of a call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResponse {
    Success {
        result: Value,
    },
    Error {
        code: String,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    NotImplemented,
}

impl MethodResponse {
    pub fn success(result: impl Into<Value>) -> Self {
        Self::Success {
            result: result.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<&CacheError> for MethodResponse {
    fn from(err: &CacheError) -> Self {
        Self::Error {
            code: err.code().to_string(),
            message: err.message(),
            details: err.details(),
        }
    }
}

impl From<CacheError> for MethodResponse {
    fn from(err: CacheError) -> Self {
        Self::from(&err)
    }
}

/// Methods this channel understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GetCacheDirectory,
    GetCacheSize,
    ClearCache,
    GetPlatformVersion,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::GetCacheDirectory,
        Method::GetCacheSize,
        Method::ClearCache,
        Method::GetPlatformVersion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetCacheDirectory => "getCacheDirectory",
            Self::GetCacheSize => "getCacheSize",
            Self::ClearCache => "clearCache",
            Self::GetPlatformVersion => "getPlatformVersion",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned for method names outside `Method::ALL`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// Routes calls to a cache service
///
/// The service may be missing when the cache location could not be
/// determined. Cache methods then answer with that error while
/// `getPlatformVersion` and unknown methods answer as usual.
pub struct MethodChannel<F> {
    service: Result<DirectoryCacheService<F>, CacheError>,
    platform: PlatformInfo,
}

impl<F: FileSystem> MethodChannel<F> {
    pub fn new(service: DirectoryCacheService<F>, platform: PlatformInfo) -> Self {
        Self {
            service: Ok(service),
            platform,
        }
    }

    /// Channel whose cache methods all fail with `error`
    pub fn unavailable(error: CacheError, platform: PlatformInfo) -> Self {
        Self {
            service: Err(error),
            platform,
        }
    }

    /// Run one call to completion
    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        let method = match call.method.parse::<Method>() {
            Ok(method) => method,
            Err(UnknownMethod(name)) => {
                tracing::debug!(method = %name, "Method not implemented");
                return MethodResponse::NotImplemented;
            }
        };
        tracing::debug!(channel = CHANNEL_NAME, %method, "Handling method call");

        let outcome = match (method, &self.service) {
            (Method::GetPlatformVersion, _) => Ok(Value::from(self.platform.to_string())),
            (_, Err(err)) => {
                tracing::debug!(%method, error = %err, "Cache location unavailable");
                return err.into();
            }
            (Method::GetCacheDirectory, Ok(service)) => service
                .resolve_root()
                .map(|path| Value::from(path.to_string_lossy().into_owned())),
            (Method::GetCacheSize, Ok(service)) => service.compute_size().map(Value::from),
            (Method::ClearCache, Ok(service)) => service.clear().map(|_| Value::Bool(true)),
        };

        match outcome {
            Ok(result) => MethodResponse::Success { result },
            Err(err) => {
                tracing::debug!(%method, error = %err, "Method call failed");
                err.into()
            }
        }
    }

    /// Decode a JSON call, run it, and encode the response
    pub fn handle_json(&self, request: &str) -> String {
        let response = match serde_json::from_str::<MethodCall>(request) {
            Ok(call) => self.handle(&call),
            Err(e) => MethodResponse::Error {
                code: INVALID_CALL.to_string(),
                message: "Malformed method call".to_string(),
                details: Some(e.to_string()),
            },
        };
        // A response holds only strings, numbers and booleans
        serde_json::to_string(&response).unwrap_or_else(|_| {
            r#"{"status":"error","code":"INVALID_CALL","message":"Unencodable response"}"#
                .to_string()
        })
    }
}
