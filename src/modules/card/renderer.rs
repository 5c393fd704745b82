use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::modules::journal::MoodEntry;

const CARD_RULE: &str = "────────────";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub date: String,
    pub tag: String,
    pub mood: String,
    pub reply: String,
}

impl Card {
    pub fn from_entry(date: &str, entry: &MoodEntry) -> Self {
        Self {
            date: date.to_string(),
            tag: entry.tag.label().to_string(),
            mood: entry.mood.clone(),
            reply: entry.reply.clone(),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.date)?;
        writeln!(f, "{}", self.tag)?;
        writeln!(f, "你說：{}", self.mood)?;
        write!(f, "AI回覆：{}", self.reply)
    }
}

/// Display sink for entries. Each call shows the card above everything
/// rendered before it; callers decide the order.
pub trait CardRenderer: Send {
    fn render(&mut self, date: &str, entry: &MoodEntry);
}

/// In-memory card container, topmost card first. Clones share the same cards.
#[derive(Debug, Clone, Default)]
pub struct CardLog {
    cards: Arc<Mutex<Vec<Card>>>,
}

impl CardLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> Vec<Card> {
        match self.cards.lock() {
            Ok(cards) => cards.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes the cards top to bottom, newest first.
    pub fn print_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for card in self.cards() {
            writeln!(out, "{}\n{}\n", CARD_RULE, card)?;
        }
        out.flush()
    }
}

impl CardRenderer for CardLog {
    fn render(&mut self, date: &str, entry: &MoodEntry) {
        let card = Card::from_entry(date, entry);
        match self.cards.lock() {
            Ok(mut cards) => cards.insert(0, card),
            Err(poisoned) => poisoned.into_inner().insert(0, card),
        }
    }
}

/// Prints each card to a writer as it arrives, so the live view runs
/// oldest to newest. Use `CardLog::print_to` for the newest-first listing.
pub struct TerminalRenderer<W: Write + Send> {
    out: W,
}

impl TerminalRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: std::io::stdout() }
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> CardRenderer for TerminalRenderer<W> {
    fn render(&mut self, date: &str, entry: &MoodEntry) {
        let card = Card::from_entry(date, entry);
        if let Err(e) = writeln!(self.out, "{}\n{}\n", CARD_RULE, card) {
            tracing::warn!(error = %e, "failed to print card");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, CardLog, CardRenderer, TerminalRenderer};
    use crate::modules::journal::{MoodEntry, MoodTag};

    #[test]
    fn test_card_display_lines() {
        let entry = MoodEntry::new("好累", "休息一下吧", MoodTag::Tired);
        let card = Card::from_entry("2025/6/1", &entry);
        assert_eq!(card.to_string(), "2025/6/1\n💤 疲憊\n你說：好累\nAI回覆：休息一下吧");
    }

    #[test]
    fn test_card_log_inserts_on_top() {
        let mut log = CardLog::new();
        log.render("2025/6/1", &MoodEntry::new("one", "r1", MoodTag::Happy));
        log.render("2025/6/1", &MoodEntry::new("two", "r2", MoodTag::Sad));
        log.render("2025/5/30", &MoodEntry::new("three", "r3", MoodTag::Lost));

        let moods: Vec<String> = log.cards().into_iter().map(|c| c.mood).collect();
        assert_eq!(moods, vec!["three", "two", "one"]);
    }

    #[test]
    fn test_card_log_clones_share_cards() {
        let log = CardLog::new();
        let mut writer = log.clone();
        writer.render("2025/6/1", &MoodEntry::new("one", "r1", MoodTag::Happy));
        assert_eq!(log.len(), 1);
        assert!(!log.is_empty());
    }

    #[test]
    fn test_card_log_prints_newest_first() {
        let mut log = CardLog::new();
        log.render("2025/6/1", &MoodEntry::new("older", "r1", MoodTag::Happy));
        log.render("2025/6/1", &MoodEntry::new("newer", "r2", MoodTag::Sad));

        let mut out = Vec::new();
        log.print_to(&mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        let newer = printed.find("你說：newer").unwrap();
        let older = printed.find("你說：older").unwrap();
        assert!(newer < older);
    }

    #[test]
    fn test_terminal_renderer_writes_card() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.render("2025/6/1", &MoodEntry::new("好累", "休息一下吧", MoodTag::Tired));
        let printed = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(printed.contains("你說：好累"));
        assert!(printed.contains("AI回覆：休息一下吧"));
    }
}
