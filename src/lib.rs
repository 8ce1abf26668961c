//! Wren - Rust 会话助手
//!
//! 模块划分：
//! - **config**: 应用配置与 API 凭证加载（TOML + 环境变量）
//! - **core**: 错误类型、会话状态投影、会话编排主循环
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Gemini / Mock）
//! - **memory**: 会话内历史与 transcript 拼接
//! - **search**: Tavily 搜索客户端与摘要回退
//! - **ui**: Ratatui TUI 界面

pub mod config;
pub mod core;
pub mod llm;
pub mod memory;
pub mod search;
pub mod ui;
