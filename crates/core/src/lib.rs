// Checkin Core - Domain Logic & Ports
// NO infrastructure dependencies: HTTP and file access live behind ports

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{truncate_chars, AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
