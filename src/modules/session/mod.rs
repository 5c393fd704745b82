pub mod controller;
pub mod events;
pub mod terminal;

pub use controller::{JournalError, SessionController, CONNECTED_MESSAGE, CONNECT_FAILED_PREFIX};
pub use events::{ConsoleNotifier, LogNotifier, QueuedEvents, UiEvent, UiEventSource, UserNotifier};
pub use terminal::TerminalEvents;
