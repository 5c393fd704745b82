use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::modules::journal::MoodTag;
use super::events::{UiEvent, UiEventSource};

pub const HELP: &str = "輸入心情後按 Enter 送出。指令：/tag <心情>、/tags、/voice、/connect、/quit";

/// Line-oriented UI: plain lines are entries, `/`-commands drive the
/// other controls. Holds the tag selector state.
pub struct TerminalEvents<R, W> {
    lines: Lines<R>,
    out: W,
    tag: MoodTag,
}

impl<R, W> TerminalEvents<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(reader: R, out: W, tag: MoodTag) -> Self {
        Self {
            lines: reader.lines(),
            out,
            tag,
        }
    }

    pub fn tag(&self) -> &MoodTag {
        &self.tag
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn say(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "{}", message) {
            tracing::warn!(error = %e, "failed to write terminal output");
        }
    }

    fn list_tags(&mut self) {
        let listing = MoodTag::ALL
            .iter()
            .map(|tag| tag.label())
            .collect::<Vec<_>>()
            .join("  ");
        self.say(&listing);
    }
}

impl<R> TerminalEvents<tokio::io::BufReader<R>, std::io::Stdout>
where
    R: tokio::io::AsyncRead + Unpin + Send,
{
    pub fn with_stdout(reader: R, tag: MoodTag) -> Self {
        Self::new(tokio::io::BufReader::new(reader), std::io::stdout(), tag)
    }
}

#[async_trait]
impl<R, W> UiEventSource for TerminalEvents<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn next_event(&mut self) -> Option<UiEvent> {
        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read terminal input");
                    return None;
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (command, rest) = match line.split_once(char::is_whitespace) {
                Some((command, rest)) => (command, rest.trim()),
                None => (line, ""),
            };

            match command {
                "/quit" | "/exit" => return None,
                "/voice" => return Some(UiEvent::Listen { tag: self.tag.clone() }),
                "/connect" => return Some(UiEvent::Connect),
                "/tags" => self.list_tags(),
                "/help" => self.say(HELP),
                "/tag" if rest.is_empty() => {
                    let current = format!("目前心情：{}", self.tag);
                    self.say(&current);
                }
                "/tag" => {
                    self.tag = MoodTag::parse(rest);
                    let current = format!("目前心情：{}", self.tag);
                    self.say(&current);
                }
                _ => {
                    return Some(UiEvent::Submit {
                        text: line.to_string(),
                        tag: self.tag.clone(),
                    })
                }
            }
        }
    }
}
