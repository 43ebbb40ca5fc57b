//! Job protocol definitions.

mod context;
mod status;
mod traits;

pub use context::JobContext;
pub use status::Status;
pub use traits::Job;
