//! 应用配置与 API 凭证：从 config/default.toml 与环境变量加载
//!
//! 配置加载顺序：先读 TOML 文件，再用环境变量 `WREN__*` 覆盖（双下划线表示嵌套，如 `WREN__LLM__MODEL=gemini-1.5-flash`）。
//! API 凭证不走 TOML：`GEMINI_API_KEY` 与 `TAVILY_API_KEY` 仅从进程环境读取，启动期一次。

use std::path::PathBuf;

use serde::Deserialize;

use crate::core::AssistantError;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub search: SearchSection,
}

/// [app] 段：标题与副标题
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_subtitle")]
    pub subtitle: String,
}

fn default_title() -> String {
    "🤖 Conversational Chatbot with Gemini & Tavily".to_string()
}

fn default_subtitle() -> String {
    "Ask me anything or search the web!".to_string()
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            subtitle: default_subtitle(),
        }
    }
}

/// [llm] 段：模型名与可选的兼容端点
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSection {
    #[serde(default = "default_model")]
    pub model: String,
    /// 未设置时用 Gemini 官方 OpenAI 兼容端点
    pub base_url: Option<String>,
}

fn default_model() -> String {
    "gemini-1.5-pro".to_string()
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: None,
        }
    }
}

/// [search] 段：搜索端点、请求条数与超时
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSection {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_num_results")]
    pub num_results: u32,
    #[serde(default = "default_search_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://api.tavily.com/search".to_string()
}

fn default_num_results() -> u32 {
    5
}

fn default_search_timeout_secs() -> u64 {
    15
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            num_results: default_num_results(),
            timeout_secs: default_search_timeout_secs(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSection::default(),
            llm: LlmSection::default(),
            search: SearchSection::default(),
        }
    }
}

/// 从 config 目录加载配置，环境变量 WREN__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 WREN__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("WREN")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

/// API 凭证：启动期一次性读取，进程生命周期内不可变
#[derive(Clone)]
pub struct Credentials {
    pub gemini_api_key: String,
    pub tavily_api_key: String,
}

impl Credentials {
    /// 从进程环境读取两个凭证；任一缺失或为空即配置错误，启动终止
    pub fn load() -> Result<Self, AssistantError> {
        Self::from_values(
            std::env::var("GEMINI_API_KEY").ok(),
            std::env::var("TAVILY_API_KEY").ok(),
        )
    }

    fn from_values(
        gemini: Option<String>,
        tavily: Option<String>,
    ) -> Result<Self, AssistantError> {
        match (
            gemini.filter(|k| !k.is_empty()),
            tavily.filter(|k| !k.is_empty()),
        ) {
            (Some(g), Some(t)) => Ok(Self {
                gemini_api_key: g,
                tavily_api_key: t,
            }),
            _ => Err(AssistantError::ConfigError(
                "GEMINI_API_KEY / TAVILY_API_KEY not set in environment".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.llm.model, "gemini-1.5-pro");
        assert_eq!(cfg.search.endpoint, "https://api.tavily.com/search");
        assert_eq!(cfg.search.num_results, 5);
        assert!(cfg.app.title.contains("Gemini"));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wren.toml");
        std::fs::write(
            &path,
            "[llm]\nmodel = \"gemini-1.5-flash\"\n\n[search]\nnum_results = 3\n",
        )
        .unwrap();

        let cfg = load_config(Some(path)).unwrap();
        assert_eq!(cfg.llm.model, "gemini-1.5-flash");
        assert_eq!(cfg.search.num_results, 3);
        // 未覆盖的键保持默认
        assert_eq!(cfg.search.endpoint, "https://api.tavily.com/search");
    }

    #[test]
    fn test_credentials_require_both_keys() {
        assert!(Credentials::from_values(None, None).is_err());
        assert!(Credentials::from_values(Some("g".into()), None).is_err());
        assert!(Credentials::from_values(None, Some("t".into())).is_err());
        // 空串与缺失同样致命
        assert!(Credentials::from_values(Some(String::new()), Some("t".into())).is_err());
    }

    #[test]
    fn test_credentials_returned_unchanged() {
        let c = Credentials::from_values(Some("g-key".into()), Some("t-key".into())).unwrap();
        assert_eq!(c.gemini_api_key, "g-key");
        assert_eq!(c.tavily_api_key, "t-key");
    }
}
