pub mod client;
pub mod fallback;

pub use client::{
    ChatBackend, ChatMessage, ChatRequest, ChatResponse, OpenAiChatBackend, ReplyClient, ReplyError,
    ReplySource,
};
pub use fallback::{FallbackTable, RandomSource, UuidRandom, GENERIC_FALLBACK};
