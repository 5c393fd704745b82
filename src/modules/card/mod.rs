pub mod renderer;

pub use renderer::{Card, CardLog, CardRenderer, TerminalRenderer};
