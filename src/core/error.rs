//! 会话错误类型
//!
//! ConfigError 在启动期致命；SearchError / ChatError 在编排器边界捕获并渲染为行内消息，
//! 不中断进程、不破坏历史。摘要失败不在此列：SummaryFallback 内部吞掉，换兜底文案。

use thiserror::Error;

/// 会话运行过程中可能出现的错误（配置、搜索、对话）
#[derive(Error, Debug)]
pub enum AssistantError {
    /// 凭证缺失等配置问题，启动期即终止
    #[error("Config error: {0}")]
    ConfigError(String),

    /// 搜索请求的网络或解析失败，可重试
    #[error("Tavily search error: {0}")]
    SearchError(String),

    /// 对话补全失败（配额、网络、响应异常），历史保持不变
    #[error("Gemini chat error: {0}")]
    ChatError(String),
}
