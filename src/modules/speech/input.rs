use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Speech recognition is not configured")]
    NotConfigured,

    #[error("Recognizer exited with status {0}")]
    RecognizerFailed(String),
}

/// One-shot recognition: a single utterance, first alternative of the first result.
#[async_trait]
pub trait SpeechInput: Send {
    async fn listen_once(&mut self, locale: &str) -> Result<Option<String>, SpeechError>;
}

/// Runs an external recognizer and reads the transcript from its stdout.
/// The locale is passed in `MOOD_JOURNAL_LOCALE`.
#[derive(Debug, Clone, Default)]
pub struct CommandRecognizer {
    command: Vec<String>,
}

impl CommandRecognizer {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    pub fn transcript_from(stdout: &str) -> Option<String> {
        stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
    }
}

#[async_trait]
impl SpeechInput for CommandRecognizer {
    async fn listen_once(&mut self, locale: &str) -> Result<Option<String>, SpeechError> {
        let (program, args) = self.command.split_first().ok_or(SpeechError::NotConfigured)?;

        let output = Command::new(program)
            .args(args)
            .env("MOOD_JOURNAL_LOCALE", locale)
            .output()
            .await?;

        if !output.status.success() {
            return Err(SpeechError::RecognizerFailed(output.status.to_string()));
        }

        let transcript = Self::transcript_from(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!(heard = transcript.is_some(), "recognition finished");
        Ok(transcript)
    }
}
