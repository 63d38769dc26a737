mod reporting;
mod session_tracking;
mod task_mutation;

pub use reporting::DailySummaryComputer;
pub use session_tracking::TimeSessionManager;
pub use task_mutation::TaskMutationGateway;
