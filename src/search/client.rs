//! Tavily 搜索客户端
//!
//! 单次 POST {query, num_results} 到搜索端点，带 Bearer 凭证与超时；
//! HTTP 非成功或传输失败统一映射为 SearchError，不向上层抛异常。
//! 响应缺 results 字段按空列表处理；缺摘要的结果逐条同步调用 SummaryFallback 补齐。

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::SearchSection;
use crate::core::AssistantError;
use crate::search::SummaryFallback;

/// 无标题/无链接时的兜底显示值
const FALLBACK_TITLE: &str = "No title available";
const FALLBACK_URL: &str = "#";

/// 单条搜索结果；snippet 可能为上游缺失后合成，绝不为空
#[derive(Clone, Debug, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    num_results: u32,
}

/// 上游响应：缺 results 字段视为空列表，而非错误
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

/// 上游单条结果，字段均可缺失，在此边界补默认值
#[derive(Debug, Deserialize)]
struct RawResult {
    title: Option<String>,
    snippet: Option<String>,
    url: Option<String>,
}

/// Tavily 客户端：持有 reqwest Client、端点与凭证；缺摘要时用 SummaryFallback 合成
pub struct SearchClient {
    client: Client,
    endpoint: String,
    api_key: String,
    num_results: u32,
    summary: SummaryFallback,
}

impl SearchClient {
    pub fn new(cfg: &SearchSection, api_key: &str, summary: SummaryFallback) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: cfg.endpoint.clone(),
            api_key: api_key.to_string(),
            num_results: cfg.num_results,
            summary,
        }
    }

    /// 执行一次搜索：网络或解析失败返回 SearchError；结果顺序与上游一致
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, AssistantError> {
        tracing::info!(query = %query, "tavily search");

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&SearchRequest {
                query,
                num_results: self.num_results,
            })
            .send()
            .await
            .map_err(|e| AssistantError::SearchError(format!("Request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(AssistantError::SearchError(format!("HTTP {}", resp.status())));
        }

        let parsed: SearchResponse = resp
            .json()
            .await
            .map_err(|e| AssistantError::SearchError(format!("Parse response: {}", e)))?;

        Ok(self.resolve(parsed.results).await)
    }

    /// 补默认标题/链接；snippet 缺失或为空串（两者同义）时逐条合成，
    /// 阻塞整个 search 调用直到全部补齐
    async fn resolve(&self, raw: Vec<RawResult>) -> Vec<SearchResult> {
        let mut out = Vec::with_capacity(raw.len());
        for r in raw {
            let title = r.title.unwrap_or_else(|| FALLBACK_TITLE.to_string());
            let snippet = match r.snippet.filter(|s| !s.is_empty()) {
                Some(s) => s,
                None => self.summary.summarize(&title).await,
            };
            let url = r.url.unwrap_or_else(|| FALLBACK_URL.to_string());
            out.push(SearchResult { title, snippet, url });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm::MockLlmClient;

    fn test_client() -> SearchClient {
        SearchClient::new(
            &SearchSection::default(),
            "test-key",
            SummaryFallback::new(Arc::new(MockLlmClient)),
        )
    }

    #[test]
    fn test_parse_preserves_length_and_order() {
        let body = r#"{"results": [
            {"title": "A", "snippet": "sa", "url": "https://a"},
            {"title": "B", "snippet": "sb", "url": "https://b"},
            {"title": "C", "snippet": "sc", "url": "https://c"}
        ]}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.results.len(), 3);
        assert_eq!(parsed.results[0].title.as_deref(), Some("A"));
        assert_eq!(parsed.results[2].title.as_deref(), Some("C"));
    }

    #[test]
    fn test_parse_missing_results_field_is_empty() {
        let parsed: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let body = r#"{"results": [{"title": "A", "url": "https://a", "score": 0.9}], "query": "x"}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert!(parsed.results[0].snippet.is_none());
    }

    #[tokio::test]
    async fn test_resolve_fills_missing_snippet_and_defaults() {
        let raw = vec![
            RawResult {
                title: Some("Rust".to_string()),
                snippet: None,
                url: Some("https://rust-lang.org".to_string()),
            },
            RawResult {
                title: Some("Go".to_string()),
                snippet: Some(String::new()),
                url: None,
            },
            RawResult {
                title: None,
                snippet: Some("kept".to_string()),
                url: Some("https://x".to_string()),
            },
        ];

        let out = test_client().resolve(raw).await;

        assert_eq!(out.len(), 3);
        // 缺失与空串同样触发合成，渲染侧绝不见空摘要
        assert!(!out[0].snippet.is_empty());
        assert!(!out[1].snippet.is_empty());
        assert_eq!(out[1].url, "#");
        assert_eq!(out[2].snippet, "kept");
        assert_eq!(out[2].title, "No title available");
    }
}
