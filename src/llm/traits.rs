//! LLM 客户端抽象
//!
//! 所有后端（OpenAI 兼容 / Gemini / Mock）实现 LlmClient：complete 接收编排器拼好的
//! 完整 transcript，返回下一条助手消息。客户端自身不保存会话状态。

use async_trait::async_trait;

use crate::core::AssistantError;

/// LLM 客户端 trait：单次非流式完成
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// 非流式完成：transcript 为全部历史与新输入的拼接
    async fn complete(&self, transcript: &str) -> Result<String, AssistantError>;

    /// 获取累计 token 使用统计：(prompt_tokens, completion_tokens, total_tokens)
    /// 默认返回 (0, 0, 0)，具体实现可覆盖
    fn token_usage(&self) -> (u64, u64, u64) {
        (0, 0, 0)
    }
}
