// Domain Layer - Pure data and invariants of one check-in cycle

pub mod credentials;
pub mod loop_state;
pub mod submission;
pub mod task;

// Re-exports
pub use credentials::Credentials;
pub use loop_state::LoopState;
pub use submission::{DoTaskRequest, SubmissionResult, SubmissionState};
pub use task::Task;
