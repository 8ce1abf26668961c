//! 会话编排器：主控循环
//!
//! 负责：读取凭证、创建 Gemini / Tavily 客户端、建立 cmd/state 双通道，
//! 并在后台任务中消费用户命令（Submit/Clear/Quit），按模式分派并更新 UI 状态。
//! 一次只处理一条提交，处理期间 input_locked 置位，UI 不再发送。

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::config::{AppConfig, Credentials};
use crate::core::{Mode, SessionPhase, UiState};
use crate::llm::{create_gemini_client, LlmClient};
use crate::memory::{ConversationMemory, ConversationTurn};
use crate::search::{SearchClient, SummaryFallback};

/// 从 UI 发往编排器的用户命令
#[derive(Debug, Clone)]
pub enum Command {
    /// 按所选模式提交用户输入
    Submit { mode: Mode, input: String },
    /// 清空会话（历史与上次输出）
    Clear,
    /// 退出应用
    Quit,
}

/// 搜索无结果时的提示文案
pub const NO_RESULTS_NOTICE: &str = "No results found for your query.";

/// 创建会话运行时：读取凭证、组装客户端并启动后台任务。
/// 凭证缺失在此处失败，调用方应直接终止启动。
pub fn create_session(
    cfg: &AppConfig,
) -> anyhow::Result<(mpsc::UnboundedSender<Command>, watch::Receiver<UiState>)> {
    let credentials = Credentials::load()?;

    let llm: Arc<dyn LlmClient> = Arc::new(create_gemini_client(&credentials.gemini_api_key, cfg));
    tracing::info!("Using Gemini LLM ({})", cfg.llm.model);

    let search = SearchClient::new(
        &cfg.search,
        &credentials.tavily_api_key,
        SummaryFallback::new(llm.clone()),
    );

    Ok(spawn_session(llm, search))
}

/// 用现成的客户端启动会话后台任务（测试可注入 Mock）。
/// 返回命令发送端与状态接收端；后台任务顺序消费命令，逐条处理到完成。
pub fn spawn_session(
    llm: Arc<dyn LlmClient>,
    search: SearchClient,
) -> (mpsc::UnboundedSender<Command>, watch::Receiver<UiState>) {
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<Command>();
    let (state_tx, state_rx) = watch::channel(UiState::default());

    tokio::spawn(async move {
        // 历史归后台任务独占，只在聊天成功路径追加
        let mut memory = ConversationMemory::new();
        let mut ui = UiState::default();

        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                Command::Submit { mode, input } => {
                    let input = input.trim().to_string();
                    if input.is_empty() {
                        continue;
                    }

                    ui.phase = SessionPhase::Processing(mode);
                    ui.input_locked = true;
                    ui.notice = None;
                    ui.error_message = None;
                    let _ = state_tx.send(ui.clone());

                    match mode {
                        Mode::Chat => {
                            let transcript = memory.transcript(&input);
                            match llm.complete(&transcript).await {
                                Ok(reply) => {
                                    memory.push(ConversationTurn {
                                        user: input,
                                        bot: reply,
                                    });
                                    ui.phase = SessionPhase::Idle;
                                    ui.history = memory.turns().to_vec();
                                    ui.results = Vec::new();
                                    let (prompt, completion, total) = llm.token_usage();
                                    tracing::debug!(prompt, completion, total, "chat round complete");
                                }
                                Err(e) => {
                                    ui.phase = SessionPhase::Error;
                                    ui.error_message = Some(e.to_string());
                                }
                            }
                        }
                        Mode::Search => match search.search(&input).await {
                            Ok(results) if results.is_empty() => {
                                ui.phase = SessionPhase::Idle;
                                ui.results = Vec::new();
                                ui.notice = Some(NO_RESULTS_NOTICE.to_string());
                            }
                            Ok(results) => {
                                ui.phase = SessionPhase::Idle;
                                ui.results = results;
                            }
                            Err(e) => {
                                ui.phase = SessionPhase::Error;
                                ui.error_message = Some(e.to_string());
                            }
                        },
                    }

                    ui.input_locked = false;
                    let _ = state_tx.send(ui.clone());
                }
                Command::Clear => {
                    memory.clear();
                    ui = UiState::default();
                    let _ = state_tx.send(ui.clone());
                }
                Command::Quit => break,
            }
        }
    });

    (cmd_tx, state_rx)
}
