mod cache;
mod call;
mod config;
mod platform;

pub use self::cache::{clear, dir, size};
pub use self::call::call;
pub use self::config::config;
pub use self::platform::platform;
