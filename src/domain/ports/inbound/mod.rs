mod reporting;
mod session_tracking;
mod task_mutation;

pub use reporting::*;
pub use session_tracking::*;
pub use task_mutation::*;
