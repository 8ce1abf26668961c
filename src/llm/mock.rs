//! Mock LLM 客户端（用于测试，无需 API）
//!
//! 取 transcript 中最后一行 "You💜:" 输入，回显为助手消息，便于本地跑通会话流程。

use async_trait::async_trait;

use crate::core::AssistantError;
use crate::llm::LlmClient;

/// Mock 客户端：回显用户最后一条输入
#[derive(Debug, Default)]
pub struct MockLlmClient;

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, transcript: &str) -> Result<String, AssistantError> {
        let last_user = transcript
            .lines()
            .rev()
            .find_map(|l| l.strip_prefix("You💜: "))
            .unwrap_or("(no input)");

        Ok(format!("Echo from Mock: {}", last_user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_echoes_last_user_line() {
        let reply = MockLlmClient
            .complete("You💜: hi\nBot🤖: yo\nYou💜: hello\nBot🤖:")
            .await
            .unwrap();
        assert_eq!(reply, "Echo from Mock: hello");
    }

    #[tokio::test]
    async fn test_mock_without_user_line() {
        let reply = MockLlmClient.complete("Summary:").await.unwrap();
        assert_eq!(reply, "Echo from Mock: (no input)");
    }
}
