pub mod types;
pub mod services;
pub mod endpoints;

pub use types::{ApiResult, SessionId};
pub use endpoints::*;
