pub mod journal_config;

pub use journal_config::{
    ConfigError, JournalConfig, ReplyConfig, SerialConfig, SpeechConfig, StorageConfig,
    DEFAULT_CONFIG_FILE,
};
