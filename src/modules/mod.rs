pub mod card;
pub mod journal;
pub mod reply;
pub mod serial;
pub mod session;
pub mod speech;
