use std::process::{Command, Stdio};

use crate::config::SpeechConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>, config: &SpeechConfig) -> Self {
        Self {
            text: text.into(),
            lang: config.locale.clone(),
            rate: config.rate,
            pitch: config.pitch,
        }
    }
}

/// Fire-and-forget speech. Implementations must not block on playback.
pub trait SpeechOutput: Send {
    fn speak(&mut self, utterance: &Utterance);
}

/// Spawns an espeak-compatible synthesizer (`-v`, `-s`, `-p`) per utterance.
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    program: String,
}

const BASE_WORDS_PER_MINUTE: f32 = 175.0;
const BASE_PITCH: f32 = 50.0;

impl CommandSynthesizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn args_for(utterance: &Utterance) -> Vec<String> {
        let words_per_minute = (BASE_WORDS_PER_MINUTE * utterance.rate).round() as u32;
        let pitch = (BASE_PITCH * utterance.pitch).round().clamp(0.0, 99.0) as u32;
        vec![
            "-v".to_string(),
            utterance.lang.to_lowercase(),
            "-s".to_string(),
            words_per_minute.to_string(),
            "-p".to_string(),
            pitch.to_string(),
            utterance.text.clone(),
        ]
    }
}

impl SpeechOutput for CommandSynthesizer {
    fn speak(&mut self, utterance: &Utterance) {
        if utterance.text.trim().is_empty() {
            return;
        }
        let spawned = Command::new(&self.program)
            .args(Self::args_for(utterance))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(mut child) => {
                tracing::debug!(pid = child.id(), "speech started");
                // Reaped off-thread so playback never blocks the caller.
                std::thread::spawn(move || {
                    if let Err(e) = child.wait() {
                        tracing::warn!(error = %e, "failed to wait for speech synthesizer");
                    }
                });
            }
            Err(e) => tracing::warn!(program = %self.program, error = %e, "failed to start speech synthesizer"),
        }
    }
}
