mod ids;
mod project;
mod session;
mod summary;
mod task;

pub use ids::*;
pub use project::*;
pub use session::*;
pub use summary::*;
pub use task::*;
