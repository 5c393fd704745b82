use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "mood_journal.toml";

const API_KEY_ENV: &str = "OPENAI_API_KEY";
const SERIAL_PORT_ENV: &str = "MOOD_JOURNAL_SERIAL_PORT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
    pub key: String,
    pub date_format: String,
}

impl StorageConfig {
    pub fn resolved_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mood_journal"),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: "moodLog".to_string(),
            // zh-TW short date, e.g. 2025/6/1
            date_format: "%Y/%-m/%-d".to_string(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    /// `{tag}` is replaced with the mood tag label.
    pub system_prompt: String,
    pub timeout_secs: Option<u64>,
}

impl ReplyConfig {
    pub fn instruction_for(&self, tag_label: &str) -> String {
        self.system_prompt.replace("{tag}", tag_label)
    }
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.8,
            api_key: String::new(),
            system_prompt: "你是一個溫柔的心靈療癒AI。使用者的心情是「{tag}」，請根據這個情緒，用對應的語氣和風格安慰、陪伴、理解他。語氣可以溫柔、感性、深沉或正向激勵，依照情緒選擇。".to_string(),
            timeout_secs: None,
        }
    }
}

impl std::fmt::Debug for ReplyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplyConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field(
                "api_key",
                if self.api_key.is_empty() { &"<not set>" } else { &"<redacted>" },
            )
            .field("system_prompt", &self.system_prompt)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub locale: String,
    pub rate: f32,
    pub pitch: f32,
    pub synthesizer: String,
    /// Program and arguments of the one-shot recognizer. Empty disables voice input.
    pub recognizer: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            locale: "zh-TW".to_string(),
            rate: 1.0,
            pitch: 1.2,
            synthesizer: "espeak-ng".to_string(),
            recognizer: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    pub port: Option<String>,
    pub baud_rate: u32,
    pub marker: String,
}

impl SerialConfig {
    pub fn marker_byte(&self) -> Result<u8, ConfigError> {
        match self.marker.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(ConfigError::Invalid(format!(
                "Serial marker '{}' must be exactly one ASCII character",
                self.marker
            ))),
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: 9600,
            marker: "B".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    pub storage: StorageConfig,
    pub reply: ReplyConfig,
    pub speech: SpeechConfig,
    pub serial: SerialConfig,
}

impl JournalConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: JournalConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: JournalConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// A missing file is not an error; any other failure is.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn apply_env_overrides(&mut self) {
        if self.reply.api_key.is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                self.reply.api_key = key;
            }
        }
        if let Ok(port) = std::env::var(SERIAL_PORT_ENV) {
            if !port.trim().is_empty() {
                self.serial.port = Some(port);
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::Invalid("Storage key cannot be empty".to_string()));
        }
        if StrftimeItems::new(&self.storage.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid(format!(
                "Date format '{}' is not a valid strftime pattern",
                self.storage.date_format
            )));
        }
        if !(0.0..=2.0).contains(&self.reply.temperature) {
            return Err(ConfigError::Invalid(format!(
                "Reply temperature {} must be between 0.0 and 2.0",
                self.reply.temperature
            )));
        }
        if self.speech.rate <= 0.0 || self.speech.pitch <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "Speech rate {} and pitch {} must be positive",
                self.speech.rate, self.speech.pitch
            )));
        }
        if self.serial.baud_rate == 0 {
            return Err(ConfigError::Invalid("Serial baud rate must be positive".to_string()));
        }
        self.serial.marker_byte()?;
        Ok(())
    }
}
