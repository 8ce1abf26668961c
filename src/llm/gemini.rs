//! Gemini API 客户端（OpenAI 兼容格式）
//!
//! Google 为 Gemini 提供 OpenAI 兼容端点，直接复用 OpenAiClient。
//! - Base URL: https://generativelanguage.googleapis.com/v1beta/openai
//! - 模型: gemini-1.5-pro（默认）、gemini-1.5-flash（响应快）

use crate::config::AppConfig;
use crate::llm::OpenAiClient;

/// Gemini API 常量
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const GEMINI_PRO: &str = "gemini-1.5-pro";
pub const GEMINI_FLASH: &str = "gemini-1.5-flash";

/// 创建 Gemini 客户端
///
/// - 凭证由启动期的 Credentials 提供，此处不读环境变量
/// - 模型与 base_url 可通过配置覆盖（自建代理等场景）
pub fn create_gemini_client(api_key: &str, cfg: &AppConfig) -> OpenAiClient {
    let base = cfg.llm.base_url.as_deref().unwrap_or(GEMINI_BASE_URL);
    OpenAiClient::new(Some(base), &cfg.llm.model, api_key)
}
