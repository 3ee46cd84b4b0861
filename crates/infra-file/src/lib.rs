// Checkin Infrastructure - File Adapters
// Implements: CredentialSource

pub mod env_file;

pub use env_file::{parse_env_lines, FileCredentialSource};
