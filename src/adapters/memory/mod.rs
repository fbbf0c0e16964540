//! In-memory persistence adapters, for tests and local development.

mod blueprint_provider;
mod session_repository;
mod user_repository;

pub use blueprint_provider::InMemoryBlueprintProvider;
pub use session_repository::InMemorySessionRepository;
pub use user_repository::InMemoryUserRepository;
