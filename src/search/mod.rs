//! 搜索层：Tavily 客户端与摘要回退

pub mod client;
pub mod summary;

pub use client::{SearchClient, SearchResult};
pub use summary::{SummaryFallback, FALLBACK_SUMMARY};
