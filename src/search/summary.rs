//! 摘要回退
//!
//! 上游结果缺摘要时，请 LLM 按标题生成四行短摘要；任何失败（模型错误、空回复）
//! 都换成固定兜底文案，绝不向渲染侧抛错。

use std::sync::Arc;

use crate::llm::LlmClient;

/// 摘要失败时的兜底文案
pub const FALLBACK_SUMMARY: &str = "No description available";

/// 摘要回退器：持有 LLM 客户端；summarize 对调用方保证总是成功
#[derive(Clone)]
pub struct SummaryFallback {
    llm: Arc<dyn LlmClient>,
}

impl SummaryFallback {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// 按标题生成短摘要；Err 或空回复一律回退为 FALLBACK_SUMMARY
    pub async fn summarize(&self, title: &str) -> String {
        let prompt = format!(
            "Provide a short, 4-line summary for the following topic:\n\nTitle: {}\n\nSummary:",
            title
        );

        match self.llm.complete(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => FALLBACK_SUMMARY.to_string(),
            Err(e) => {
                tracing::warn!("Summary fallback failed: {}", e);
                FALLBACK_SUMMARY.to_string()
            }
        }
    }
}
