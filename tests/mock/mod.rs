pub mod session_mock;

pub use session_mock::*;
