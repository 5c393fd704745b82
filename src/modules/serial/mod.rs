pub mod link;

pub use link::{
    LinkState, NotifyOutcome, PortSelector, SerialError, SerialLink, SerialWriter, SystemPortSelector,
};
