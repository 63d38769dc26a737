mod clock;
mod project_store;
mod session_store;
mod task_store;

pub use clock::*;
pub use project_store::*;
pub use session_store::*;
pub use task_store::*;
