use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::modules::card::CardLog;
use crate::modules::journal::{FixedClock, MemoryKeyValueStore, MoodEntry, MoodLogStore, MoodTag};
use crate::modules::reply::{
    ChatBackend, ChatRequest, ChatResponse, RandomSource, ReplyError, ReplySource,
};
use crate::modules::serial::{PortSelector, SerialError, SerialLink, SerialWriter};
use crate::modules::session::{LogNotifier, SessionController};
use crate::modules::speech::{SpeechError, SpeechInput, SpeechOutput, Utterance};

pub struct ScriptedBackend {
    response: Option<String>,
}

impl ScriptedBackend {
    pub fn replying(content: &str) -> Self {
        Self {
            response: Some(content.to_string()),
        }
    }

    pub fn unreachable() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, ReplyError> {
        match &self.response {
            Some(content) => {
                let body = serde_json::json!({
                    "choices": [{ "message": { "role": "assistant", "content": content } }]
                });
                serde_json::from_value(body)
                    .map_err(|e| ReplyError::InvalidResponse(e.to_string()))
            }
            None => Err(ReplyError::InvalidResponse("unreachable".to_string())),
        }
    }
}

pub struct FixedRandom(pub usize);

impl RandomSource for FixedRandom {
    fn next_index(&mut self, _len: usize) -> usize {
        self.0
    }
}

pub struct StaticReplies(pub String);

#[async_trait]
impl ReplySource for StaticReplies {
    async fn get_reply(&mut self, _message: &str, _tag: &MoodTag) -> String {
        self.0.clone()
    }
}

pub struct EmptyReplies;

#[async_trait]
impl ReplySource for EmptyReplies {
    async fn get_reply(&mut self, _message: &str, _tag: &MoodTag) -> String {
        String::new()
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

pub struct SilentInput;

#[async_trait]
impl SpeechInput for SilentInput {
    async fn listen_once(&mut self, _locale: &str) -> Result<Option<String>, SpeechError> {
        Ok(None)
    }
}

pub struct NoDeviceSelector;

impl PortSelector for NoDeviceSelector {
    fn request_port(&mut self, _baud_rate: u32) -> Result<Box<dyn SerialWriter>, SerialError> {
        Err(SerialError::NoDevice)
    }
}

/// Shared handles into the doubles wired into a test controller.
pub struct SessionParts {
    pub backend: MemoryKeyValueStore,
    pub cards: CardLog,
    pub speech: RecordingSpeech,
}

impl SessionParts {
    pub fn new() -> Self {
        Self {
            backend: MemoryKeyValueStore::new(),
            cards: CardLog::new(),
            speech: RecordingSpeech::default(),
        }
    }

    pub fn controller_with(&self, replies: Box<dyn ReplySource>) -> SessionController {
        let store = MoodLogStore::new(Box::new(self.backend.clone()), "moodLog");
        let serial = SerialLink::new(Box::new(NoDeviceSelector), 9600, b'B');
        SessionController::new(store, replies, Box::new(self.cards.clone()), serial)
            .with_speech_output(Box::new(self.speech.clone()))
            .with_speech_input(Box::new(SilentInput))
            .with_notifier(Box::new(LogNotifier))
            .with_clock(Box::new(FixedClock::new(JournalTestHelpers::TODAY)))
    }

    pub fn controller_replying(&self, reply: &str) -> SessionController {
        self.controller_with(Box::new(StaticReplies(reply.to_string())))
    }

    pub fn spoken(&self) -> Vec<String> {
        self.speech
            .spoken
            .lock()
            .unwrap()
            .iter()
            .map(|utterance| utterance.text.clone())
            .collect()
    }
}

pub struct JournalTestData;

impl JournalTestData {
    pub fn happy_entry() -> MoodEntry {
        MoodEntry::new("今天考試考好了", "太棒了，替你開心！", MoodTag::Happy)
    }

    pub fn sad_entry() -> MoodEntry {
        MoodEntry::new("下雨天心情很差", "我在這裡陪你。", MoodTag::Sad)
    }
}

pub struct JournalTestHelpers;

impl JournalTestHelpers {
    pub const TODAY: &'static str = "2025/6/1";
}
