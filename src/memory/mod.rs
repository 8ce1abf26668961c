//! 记忆层：会话内短期历史

pub mod conversation;

pub use conversation::{ConversationMemory, ConversationTurn};
