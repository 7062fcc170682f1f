//! Task domain entities.

pub mod model;

pub use model::{CreateTask, TITLE_MAX_LENGTH, Task, UpdateTask};
