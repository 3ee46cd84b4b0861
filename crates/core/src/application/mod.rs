// Application Layer - Use cases of one check-in cycle and the loop around it

pub mod constants;
pub mod cycle;
pub mod retry;
pub mod scheduler;
pub mod session_probe;
pub mod task_selector;
pub mod task_submitter;

// Re-exports
pub use cycle::{CycleReport, DailyTaskRunner};
pub use retry::RetryPolicy;
pub use scheduler::{interval_hours_or_default, SchedulerConfig, SchedulerLoop};
pub use session_probe::SessionProbe;
pub use task_selector::{select_daily_task, TaskSelector};
pub use task_submitter::{classify, TaskSubmitter};
