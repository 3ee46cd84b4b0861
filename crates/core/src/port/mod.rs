// Port Layer - Interfaces for external dependencies

pub mod credential_source;
pub mod rewards_api;
pub mod timing; // For deterministic testing

// Re-exports
pub use credential_source::CredentialSource;
pub use rewards_api::{HttpReply, RewardsApi};
pub use timing::{JitterSource, Sleeper};
