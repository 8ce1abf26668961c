//! 状态定义：Mode、SessionPhase 与 UiState 投影
//!
//! UI 只持有轻量的 UiState（阶段、历史、结果、提示、错误、锁）；完整状态由编排器维护并投影。

use serde::Serialize;

use crate::memory::ConversationTurn;
use crate::search::SearchResult;

/// 每次提交选择的分支（UI 单选器）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Mode {
    Chat,
    Search,
}

impl Mode {
    /// UI 单选器文案
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Chat => "Chat with Gemini",
            Mode::Search => "Search with Tavily",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Mode::Chat => Mode::Search,
            Mode::Search => Mode::Chat,
        }
    }
}

/// 会话阶段（UI 投影用）：每次非空提交 Idle -> Processing(mode)，完成后回 Idle 或 Error
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    Idle,
    Processing(Mode),
    Error,
}

/// UI 看到的「投影」状态，轻量且易于渲染
#[derive(Clone, Debug, Serialize)]
pub struct UiState {
    pub phase: SessionPhase,
    /// 全部对话轮次，仅追加；搜索分支不触碰
    pub history: Vec<ConversationTurn>,
    /// 最近一次搜索的结果；新的聊天成功后清空
    pub results: Vec<SearchResult>,
    /// 空结果等提示性文案
    pub notice: Option<String>,
    pub error_message: Option<String>,
    pub input_locked: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            history: Vec::new(),
            results: Vec::new(),
            notice: None,
            error_message: None,
            input_locked: false,
        }
    }
}
