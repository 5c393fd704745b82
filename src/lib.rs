pub mod config;
pub mod modules;
pub mod api;

#[cfg(test)]
mod _test_mock;

pub use config::{JournalConfig, ReplyConfig, SpeechConfig, SerialConfig, StorageConfig, ConfigError};
pub use modules::journal::{MoodEntry, MoodTag, MoodLog, MoodLogStore, KeyValueStore, StorageError};
pub use modules::reply::{ReplyClient, ReplySource, ReplyError, FallbackTable};
pub use modules::card::{Card, CardLog, CardRenderer};
pub use modules::serial::{SerialLink, SerialError, NotifyOutcome};
pub use modules::session::{SessionController, JournalError, UiEvent};
