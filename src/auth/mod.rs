// Credentials and caller identification

pub mod errors;
pub mod identity;
pub mod models;
pub mod password;
pub mod service;

pub use errors::*;
pub use identity::{AuthenticatedUser, Caller};
pub use models::*;
pub use service::*;
