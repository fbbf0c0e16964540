//! Domain layer - pure business logic, no IO.

pub mod assessment;
pub mod diagnostic;
pub mod foundation;
