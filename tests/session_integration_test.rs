//! 会话编排集成测试
//!
//! 通过 cmd/state 双通道驱动编排器：Mock LLM 验证聊天分支的历史追加与失败路径，
//! 不可达端点验证搜索分支的行内错误渲染。

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::watch;

    use wren::config::SearchSection;
    use wren::core::{spawn_session, AssistantError, Command, Mode, SessionPhase, UiState};
    use wren::llm::{LlmClient, MockLlmClient};
    use wren::search::{SearchClient, SummaryFallback};

    struct FailingLlm;

    #[async_trait::async_trait]
    impl LlmClient for FailingLlm {
        async fn complete(&self, _transcript: &str) -> Result<String, AssistantError> {
            Err(AssistantError::ChatError("quota exceeded".to_string()))
        }
    }

    /// 指向本机未监听端口，连接必然被拒绝
    fn unreachable_search(llm: Arc<dyn LlmClient>) -> SearchClient {
        let cfg = SearchSection {
            endpoint: "http://127.0.0.1:9/search".to_string(),
            num_results: 5,
            timeout_secs: 2,
        };
        SearchClient::new(&cfg, "test-key", SummaryFallback::new(llm))
    }

    /// 等待编排器处理完当前提交（input_locked 回落）
    async fn wait_settled(state_rx: &mut watch::Receiver<UiState>) -> UiState {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                state_rx.changed().await.expect("session task alive");
                let state = state_rx.borrow().clone();
                if !state.input_locked {
                    return state;
                }
            }
        })
        .await
        .expect("session settled in time")
    }

    #[tokio::test]
    async fn test_chat_success_appends_one_turn() {
        let llm: Arc<dyn LlmClient> = Arc::new(MockLlmClient);
        let (cmd_tx, mut state_rx) = spawn_session(llm.clone(), unreachable_search(llm));

        cmd_tx
            .send(Command::Submit {
                mode: Mode::Chat,
                input: "hello".to_string(),
            })
            .unwrap();

        let state = wait_settled(&mut state_rx).await;
        assert_eq!(state.phase, SessionPhase::Idle);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].user, "hello");
        assert_eq!(state.history[0].bot, "Echo from Mock: hello");
        assert!(state.error_message.is_none());
    }

    #[tokio::test]
    async fn test_chat_history_grows_in_order() {
        let llm: Arc<dyn LlmClient> = Arc::new(MockLlmClient);
        let (cmd_tx, mut state_rx) = spawn_session(llm.clone(), unreachable_search(llm));

        for input in ["one", "two", "three"] {
            cmd_tx
                .send(Command::Submit {
                    mode: Mode::Chat,
                    input: input.to_string(),
                })
                .unwrap();
            wait_settled(&mut state_rx).await;
        }

        let state = state_rx.borrow().clone();
        let users: Vec<&str> = state.history.iter().map(|t| t.user.as_str()).collect();
        assert_eq!(users, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_chat_failure_leaves_history_unchanged() {
        let llm: Arc<dyn LlmClient> = Arc::new(FailingLlm);
        let (cmd_tx, mut state_rx) = spawn_session(llm.clone(), unreachable_search(llm));

        cmd_tx
            .send(Command::Submit {
                mode: Mode::Chat,
                input: "hello".to_string(),
            })
            .unwrap();

        let state = wait_settled(&mut state_rx).await;
        assert_eq!(state.phase, SessionPhase::Error);
        assert!(state.history.is_empty());
        let err = state.error_message.expect("error rendered inline");
        assert!(err.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_search_transport_error_rendered_inline() {
        let llm: Arc<dyn LlmClient> = Arc::new(MockLlmClient);
        let (cmd_tx, mut state_rx) = spawn_session(llm.clone(), unreachable_search(llm));

        cmd_tx
            .send(Command::Submit {
                mode: Mode::Search,
                input: "rust vs go".to_string(),
            })
            .unwrap();

        let state = wait_settled(&mut state_rx).await;
        assert_eq!(state.phase, SessionPhase::Error);
        // 搜索分支不触碰历史
        assert!(state.history.is_empty());
        let err = state.error_message.expect("error rendered inline");
        assert!(err.contains("Tavily search error"));
    }

    #[tokio::test]
    async fn test_clear_resets_session() {
        let llm: Arc<dyn LlmClient> = Arc::new(MockLlmClient);
        let (cmd_tx, mut state_rx) = spawn_session(llm.clone(), unreachable_search(llm));

        cmd_tx
            .send(Command::Submit {
                mode: Mode::Chat,
                input: "hello".to_string(),
            })
            .unwrap();
        wait_settled(&mut state_rx).await;

        cmd_tx.send(Command::Clear).unwrap();
        let state = wait_settled(&mut state_rx).await;
        assert!(state.history.is_empty());
        assert_eq!(state.phase, SessionPhase::Idle);
    }
}
