use thiserror::Error;

use crate::config::{ConfigError, JournalConfig, SpeechConfig};
use crate::modules::card::CardRenderer;
use crate::modules::journal::{
    Clock, FileKeyValueStore, LocalClock, MoodEntry, MoodLog, MoodLogStore, MoodTag, StorageError,
};
use crate::modules::reply::{ReplyClient, ReplyError, ReplySource};
use crate::modules::serial::{LinkState, NotifyOutcome, SerialError, SerialLink};
use crate::modules::speech::{
    CommandRecognizer, CommandSynthesizer, SpeechError, SpeechInput, SpeechOutput, Utterance,
};
use super::events::{ConsoleNotifier, UiEvent, UiEventSource, UserNotifier};

pub const CONNECTED_MESSAGE: &str = "✅ 成功連接裝置！";
pub const CONNECT_FAILED_PREFIX: &str = "❌ 無法連接裝置：";

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serial error: {0}")]
    Serial(#[from] SerialError),

    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    #[error("Reply client error: {0}")]
    Reply(#[from] ReplyError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Owns every port of one journal session and runs them in order.
pub struct SessionController {
    store: MoodLogStore,
    replies: Box<dyn ReplySource>,
    renderer: Box<dyn CardRenderer>,
    serial: SerialLink,
    speech_out: Box<dyn SpeechOutput>,
    speech_in: Box<dyn SpeechInput>,
    notifier: Box<dyn UserNotifier>,
    clock: Box<dyn Clock>,
    voice: SpeechConfig,
}

impl SessionController {
    pub fn new(
        store: MoodLogStore,
        replies: Box<dyn ReplySource>,
        renderer: Box<dyn CardRenderer>,
        serial: SerialLink,
    ) -> Self {
        let voice = SpeechConfig::default();
        Self {
            store,
            replies,
            renderer,
            serial,
            speech_out: Box::new(CommandSynthesizer::new(voice.synthesizer.clone())),
            speech_in: Box::new(CommandRecognizer::new(voice.recognizer.clone())),
            notifier: Box::new(ConsoleNotifier),
            clock: Box::new(LocalClock::default()),
            voice,
        }
    }

    /// Native adapters for everything except the card sink and alerts.
    pub fn from_config(
        config: &JournalConfig,
        renderer: Box<dyn CardRenderer>,
        notifier: Box<dyn UserNotifier>,
    ) -> Result<Self, JournalError> {
        config.validate()?;

        let backend = FileKeyValueStore::new(config.storage.resolved_data_dir());
        let store = MoodLogStore::new(Box::new(backend), config.storage.key.clone());
        let replies = ReplyClient::from_config(&config.reply)?;
        let serial = SerialLink::from_config(&config.serial)?;

        Ok(Self::new(store, Box::new(replies), renderer, serial)
            .with_speech_output(Box::new(CommandSynthesizer::new(config.speech.synthesizer.clone())))
            .with_speech_input(Box::new(CommandRecognizer::new(config.speech.recognizer.clone())))
            .with_notifier(notifier)
            .with_clock(Box::new(LocalClock::new(config.storage.date_format.clone())))
            .with_voice(config.speech.clone()))
    }

    pub fn with_speech_output(mut self, speech_out: Box<dyn SpeechOutput>) -> Self {
        self.speech_out = speech_out;
        self
    }

    pub fn with_speech_input(mut self, speech_in: Box<dyn SpeechInput>) -> Self {
        self.speech_in = speech_in;
        self
    }

    pub fn with_notifier(mut self, notifier: Box<dyn UserNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_voice(mut self, voice: SpeechConfig) -> Self {
        self.voice = voice;
        self
    }

    /// Renders every stored entry, bucket by bucket, in storage order.
    pub fn start(&mut self) -> Result<usize, JournalError> {
        let log = self.store.load()?;
        for (date, entry) in log.iter() {
            self.renderer.render(date, entry);
        }
        let rendered = log.entry_count();
        tracing::debug!(rendered, "replayed stored entries");
        Ok(rendered)
    }

    /// Returns `None` without touching any state when the text is blank or
    /// no reply could be produced.
    pub async fn submit(&mut self, text: &str, tag: MoodTag) -> Result<Option<MoodEntry>, JournalError> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let today = self.clock.today();
        // Read before the reply arrives; a concurrent writer in between is overwritten.
        let mut log = self.store.load()?;

        let reply = self.replies.get_reply(text, &tag).await;
        if reply.trim().is_empty() {
            tracing::warn!(tag = %tag, "no reply produced, entry dropped");
            return Ok(None);
        }

        let entry = MoodEntry::new(text, reply, tag);
        log.prepend(&today, entry.clone());
        self.store.save(&log)?;
        tracing::info!(date = %today, tag = %entry.tag, "mood entry recorded");

        self.renderer.render(&today, &entry);
        self.speech_out.speak(&Utterance::new(entry.reply.clone(), &self.voice));
        self.serial.notify();

        Ok(Some(entry))
    }

    pub async fn listen(&mut self, tag: MoodTag) -> Result<Option<MoodEntry>, JournalError> {
        match self.speech_in.listen_once(&self.voice.locale).await? {
            Some(transcript) => self.submit(&transcript, tag).await,
            None => {
                tracing::debug!("nothing recognized");
                Ok(None)
            }
        }
    }

    pub fn connect(&mut self) -> Result<(), JournalError> {
        match self.serial.connect() {
            Ok(()) => {
                self.notifier.alert(CONNECTED_MESSAGE);
                Ok(())
            }
            Err(e) => {
                self.notifier.alert(&format!("{}{}", CONNECT_FAILED_PREFIX, e));
                Err(e.into())
            }
        }
    }

    pub fn notify_device(&mut self) -> NotifyOutcome {
        self.serial.notify()
    }

    pub fn link_state(&self) -> LinkState {
        self.serial.state()
    }

    pub fn log(&self) -> Result<MoodLog, JournalError> {
        Ok(self.store.load()?)
    }

    pub async fn handle(&mut self, event: UiEvent) -> Result<(), JournalError> {
        match event {
            UiEvent::Submit { text, tag } => {
                self.submit(text.trim(), tag).await?;
            }
            UiEvent::Listen { tag } => {
                self.listen(tag).await?;
            }
            UiEvent::Connect => self.connect()?,
        }
        Ok(())
    }

    /// Handles events until the source closes. A failed event is logged and
    /// the session carries on.
    pub async fn run(&mut self, events: &mut dyn UiEventSource) -> usize {
        let mut handled = 0;
        while let Some(event) = events.next_event().await {
            if let Err(e) = self.handle(event).await {
                tracing::error!(error = %e, "event failed");
            }
            handled += 1;
        }
        handled
    }
}
