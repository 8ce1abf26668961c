//! 会话历史
//!
//! 保存本次会话内全部 user/bot 轮次（仅追加、按提交顺序），并负责拼接发给 LLM 的 transcript。
//! 历史是跨提交携带的唯一状态，会话结束（或 Clear）时整体清空。

use serde::{Deserialize, Serialize};

/// 单轮对话：一次成功的 user 提交与 bot 回复，创建后不再修改
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub user: String,
    pub bot: String,
}

/// 会话历史：仅追加，按提交时间严格有序
#[derive(Clone, Debug, Default)]
pub struct ConversationMemory {
    turns: Vec<ConversationTurn>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// 将全部历史与新输入拼为单个 prompt：
    /// 每轮 "You💜: {user}\nBot🤖: {bot}"，末尾 "\nYou💜: {input}\nBot🤖:" 留给模型补全
    pub fn transcript(&self, input: &str) -> String {
        let context = self
            .turns
            .iter()
            .map(|t| format!("You💜: {}\nBot🤖: {}", t.user, t.bot))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\nYou💜: {}\nBot🤖:", context, input)
    }
}
