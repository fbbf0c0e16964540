//! Application layer - use-case handlers and the remote call executor.

pub mod errors;
pub mod handlers;
pub mod remote_call;

pub use errors::AssessmentError;
