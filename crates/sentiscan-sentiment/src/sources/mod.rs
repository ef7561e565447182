//! Text source abstractions.

mod google_news;
pub mod language;
mod reddit;
mod twitter;

pub use google_news::GoogleNewsSource;
pub use reddit::RedditSource;
pub use twitter::{AccessToken, PinAuthorizer, TerminalPinPrompt, TwitterSource};

use std::time::Duration;

use async_trait::async_trait;
use sentiscan_core::AppConfig;

use crate::error::SentimentError;
use crate::types::TextItem;

/// Fetches up to [`SourceSettings::limit`] short texts for a query.
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Short identifier used in logs and per-source counts.
    fn name(&self) -> &'static str;

    /// Fetch texts in source order, already filtered by the source's own policy.
    async fn fetch(&self, query: &str) -> Result<Vec<TextItem>, SentimentError>;
}

/// HTTP and cap settings shared by every source.
#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Maximum items a source returns.
    pub limit: usize,
}

impl SourceSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            limit: config.source_limit,
        }
    }

    pub(crate) fn http_client(&self) -> Result<reqwest::Client, SentimentError> {
        Ok(reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(self.user_agent.clone())
            .build()?)
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "sentiscan/0.1 (keyword-sentiment)".to_string(),
            limit: 100,
        }
    }
}
