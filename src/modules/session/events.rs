use async_trait::async_trait;
use std::collections::VecDeque;

use crate::modules::journal::MoodTag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Typed entry with the currently selected tag.
    Submit { text: String, tag: MoodTag },
    /// Voice control: recognize one utterance, then submit it with `tag`.
    Listen { tag: MoodTag },
    Connect,
}

#[async_trait]
pub trait UiEventSource: Send {
    /// `None` once the source is closed.
    async fn next_event(&mut self) -> Option<UiEvent>;
}

/// Replays a fixed list of events.
#[derive(Debug, Clone, Default)]
pub struct QueuedEvents {
    events: VecDeque<UiEvent>,
}

impl QueuedEvents {
    pub fn new(events: impl IntoIterator<Item = UiEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: UiEvent) {
        self.events.push_back(event);
    }
}

#[async_trait]
impl UiEventSource for QueuedEvents {
    async fn next_event(&mut self) -> Option<UiEvent> {
        self.events.pop_front()
    }
}

/// Blocking, user-visible message (connection results).
pub trait UserNotifier: Send {
    fn alert(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl UserNotifier for ConsoleNotifier {
    fn alert(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// For hosts that read results from return values instead of a dialog.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl UserNotifier for LogNotifier {
    fn alert(&mut self, message: &str) {
        tracing::info!(alert = %message, "user alert");
    }
}

#[cfg(test)]
mod tests {
    use super::{QueuedEvents, UiEvent, UiEventSource};
    use crate::modules::journal::MoodTag;

    #[test]
    fn test_queued_events_drain_in_order() {
        let mut events = QueuedEvents::new(vec![UiEvent::Connect]);
        events.push(UiEvent::Listen { tag: MoodTag::Sad });

        tokio_test::block_on(async {
            assert_eq!(events.next_event().await, Some(UiEvent::Connect));
            assert_eq!(events.next_event().await, Some(UiEvent::Listen { tag: MoodTag::Sad }));
            assert_eq!(events.next_event().await, None);
        });
    }
}
