use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

use mood_journal::modules::card::CardLog;
use mood_journal::modules::journal::{FixedClock, MemoryKeyValueStore, MoodLogStore, MoodTag};
use mood_journal::modules::reply::{
    ChatBackend, ChatRequest, ChatResponse, RandomSource, ReplyError, ReplySource,
};
use mood_journal::modules::serial::{PortSelector, SerialError, SerialLink, SerialWriter};
use mood_journal::modules::session::{SessionController, UserNotifier};
use mood_journal::modules::speech::{SpeechError, SpeechInput, SpeechOutput, Utterance};

pub const TODAY: &str = "2025/6/1";

/// Chat backend that answers with fixed content or fails every call,
/// recording each request it sees.
#[derive(Clone, Default)]
pub struct MockChatBackend {
    content: Option<String>,
    pub requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockChatBackend {
    pub fn replying(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ReplyError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.content {
            Some(content) => Ok(serde_json::from_value(serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": content } }]
            }))
            .unwrap()),
            None => Err(ReplyError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            }),
        }
    }
}

pub struct SequenceRandom {
    picks: VecDeque<usize>,
}

impl SequenceRandom {
    pub fn new(picks: &[usize]) -> Self {
        Self {
            picks: picks.iter().copied().collect(),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_index(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % len.max(1)
    }
}

pub struct FixedReply(pub String);

#[async_trait]
impl ReplySource for FixedReply {
    async fn get_reply(&mut self, _message: &str, _tag: &MoodTag) -> String {
        self.0.clone()
    }
}

/// Holds every reply until the barrier fills, so all participants load the
/// log before any of them saves.
pub struct GatedReply {
    pub reply: String,
    pub gate: Arc<Barrier>,
}

#[async_trait]
impl ReplySource for GatedReply {
    async fn get_reply(&mut self, _message: &str, _tag: &MoodTag) -> String {
        self.gate.wait().await;
        self.reply.clone()
    }
}

#[derive(Clone, Default)]
pub struct RecordingSpeech {
    pub spoken: Arc<Mutex<Vec<Utterance>>>,
}

impl SpeechOutput for RecordingSpeech {
    fn speak(&mut self, utterance: &Utterance) {
        self.spoken.lock().unwrap().push(utterance.clone());
    }
}

pub struct ScriptedRecognizer {
    transcripts: VecDeque<Option<String>>,
}

impl ScriptedRecognizer {
    pub fn new(transcripts: Vec<Option<&str>>) -> Self {
        Self {
            transcripts: transcripts
                .into_iter()
                .map(|t| t.map(str::to_string))
                .collect(),
        }
    }
}

#[async_trait]
impl SpeechInput for ScriptedRecognizer {
    async fn listen_once(&mut self, _locale: &str) -> Result<Option<String>, SpeechError> {
        Ok(self.transcripts.pop_front().flatten())
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub alerts: Arc<Mutex<Vec<String>>>,
}

impl UserNotifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

#[derive(Clone, Default)]
pub struct RecordingWriter {
    pub written: Arc<Mutex<Vec<u8>>>,
    pub fail: bool,
}

impl SerialWriter for RecordingWriter {
    fn write_bytes(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        if self.fail {
            return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "device unplugged"));
        }
        self.written.lock().unwrap().extend_from_slice(bytes);
        Ok(())
    }
}

/// Hands out the given writer, or reports no device when there is none.
pub struct MockPortSelector {
    writer: Option<RecordingWriter>,
    pub requested_baud: Arc<Mutex<Vec<u32>>>,
}

impl MockPortSelector {
    pub fn with_writer(writer: RecordingWriter) -> Self {
        Self {
            writer: Some(writer),
            requested_baud: Arc::default(),
        }
    }

    pub fn without_device() -> Self {
        Self {
            writer: None,
            requested_baud: Arc::default(),
        }
    }
}

impl PortSelector for MockPortSelector {
    fn request_port(&mut self, baud_rate: u32) -> Result<Box<dyn SerialWriter>, SerialError> {
        self.requested_baud.lock().unwrap().push(baud_rate);
        match &self.writer {
            Some(writer) => Ok(Box::new(writer.clone())),
            None => Err(SerialError::NoDevice),
        }
    }
}

/// Shared handles to everything a test controller writes to.
#[derive(Clone, Default)]
pub struct SessionHarness {
    pub backend: MemoryKeyValueStore,
    pub cards: CardLog,
    pub speech: RecordingSpeech,
    pub alerts: RecordingNotifier,
}

impl SessionHarness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controller(&self, replies: Box<dyn ReplySource>, selector: MockPortSelector) -> SessionController {
        let store = MoodLogStore::new(Box::new(self.backend.clone()), "moodLog");
        let serial = SerialLink::new(Box::new(selector), 9600, b'B');
        SessionController::new(store, replies, Box::new(self.cards.clone()), serial)
            .with_speech_output(Box::new(self.speech.clone()))
            .with_speech_input(Box::new(ScriptedRecognizer::new(Vec::new())))
            .with_notifier(Box::new(self.alerts.clone()))
            .with_clock(Box::new(FixedClock::new(TODAY)))
    }

    pub fn replying(&self, reply: &str) -> SessionController {
        self.controller(Box::new(FixedReply(reply.to_string())), MockPortSelector::without_device())
    }

    pub fn spoken(&self) -> Vec<String> {
        self.speech.spoken.lock().unwrap().iter().map(|u| u.text.clone()).collect()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.alerts.lock().unwrap().clone()
    }
}
