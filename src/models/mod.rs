// Data models for users, calendar events and tasks

pub mod event;
pub mod formats;
pub mod stats;
pub mod task;
pub mod user;

pub use event::*;
pub use stats::*;
pub use task::*;
pub use user::*;
