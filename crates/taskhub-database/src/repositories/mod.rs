//! PostgreSQL implementations of the store traits.

pub mod session;
pub mod task;
pub mod user;

pub use session::SessionRepository;
pub use task::TaskRepository;
pub use user::UserRepository;
