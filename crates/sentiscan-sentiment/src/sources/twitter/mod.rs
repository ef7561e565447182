//! Twitter v1.1 search source (OAuth 1.0a, out-of-band PIN flow).
//!
//! Each fetch runs the full authorization dance: request token, PIN from the
//! [`PinAuthorizer`], access token, credential check. It then pages through
//! extended-mode search results, keeps English text that is neither a retweet
//! nor a mention, and returns the first `limit` survivors.

mod auth;
mod oauth1;

pub use auth::{AccessToken, PinAuthorizer, TerminalPinPrompt};

use async_trait::async_trait;
use sentiscan_core::TwitterCredentials;
use serde::Deserialize;

use self::oauth1::{encode, encode_query, parse_form, Signer};
use super::language::is_english;
use super::{SourceSettings, TextSource};
use crate::error::SentimentError;
use crate::types::TextItem;

const DEFAULT_BASE_URL: &str = "https://api.twitter.com";
/// Raw tweets scanned before filtering.
const DEFAULT_SCAN_LIMIT: usize = 900;
/// Search API maximum page size.
const PAGE_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    statuses: Vec<Status>,
}

#[derive(Debug, Deserialize)]
struct Status {
    id: u64,
    full_text: Option<String>,
    text: Option<String>,
}

impl Status {
    fn into_text(self) -> String {
        self.full_text.or(self.text).unwrap_or_default()
    }
}

pub struct TwitterSource {
    client: reqwest::Client,
    signer: Signer,
    authorizer: Box<dyn PinAuthorizer>,
    base_url: String,
    limit: usize,
    scan_limit: usize,
}

impl TwitterSource {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn new(
        credentials: &TwitterCredentials,
        authorizer: Box<dyn PinAuthorizer>,
        settings: &SourceSettings,
    ) -> Result<Self, SentimentError> {
        Self::with_base_url(credentials, authorizer, settings, DEFAULT_BASE_URL)
    }

    /// Point every OAuth and API call at a custom host (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(
        credentials: &TwitterCredentials,
        authorizer: Box<dyn PinAuthorizer>,
        settings: &SourceSettings,
        base_url: &str,
    ) -> Result<Self, SentimentError> {
        Ok(Self {
            client: settings.http_client()?,
            signer: Signer::consumer(&credentials.consumer_key, &credentials.consumer_secret),
            authorizer,
            base_url: base_url.trim_end_matches('/').to_string(),
            limit: settings.limit,
            scan_limit: DEFAULT_SCAN_LIMIT.max(settings.limit),
        })
    }

    /// Override how many raw tweets are scanned before filtering.
    #[must_use]
    pub fn with_scan_limit(mut self, scan_limit: usize) -> Self {
        self.scan_limit = scan_limit;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_for_token(
        &self,
        signer: &Signer,
        path: &str,
        extra: &[(&str, &str)],
    ) -> Result<AccessToken, SentimentError> {
        let url = self.url(path);
        let header = signer.authorization("POST", &url, &[], extra)?;
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, header)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SentimentError::Authorization(format!(
                "{path} failed with status {status}"
            )));
        }

        let body = response.text().await?;
        let pairs = parse_form(&body);
        let field = |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
                .ok_or_else(|| SentimentError::Authorization(format!("{path} response missing {name}")))
        };

        Ok(AccessToken {
            token: field("oauth_token")?,
            secret: field("oauth_token_secret")?,
        })
    }

    /// Run the PIN flow and return an access token.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Authorization`] if any step is rejected or the
    /// authorizer yields no PIN.
    pub async fn authorize(&self) -> Result<AccessToken, SentimentError> {
        let request = self
            .post_for_token(&self.signer, "/oauth/request_token", &[("oauth_callback", "oob")])
            .await?;

        let authorize_url = format!(
            "{}?oauth_token={}",
            self.url("/oauth/authorize"),
            encode(&request.token)
        );
        let pin = self.authorizer.pin(&authorize_url).await?;

        let request_signer = self.signer.with_token(&request.token, &request.secret);
        self.post_for_token(
            &request_signer,
            "/oauth/access_token",
            &[("oauth_verifier", pin.trim())],
        )
        .await
    }

    async fn signed_get(
        &self,
        signer: &Signer,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response, SentimentError> {
        let url = self.url(path);
        let header = signer.authorization("GET", &url, query, &[])?;
        let full_url = if query.is_empty() {
            url
        } else {
            format!("{url}?{}", encode_query(query))
        };

        let response = self
            .client
            .get(full_url)
            .header(reqwest::header::AUTHORIZATION, header)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SentimentError::Twitter(format!(
                "GET {path} failed with status {}",
                response.status()
            )));
        }
        Ok(response)
    }

    /// Page through search results until `scan_limit` tweets or no more pages.
    async fn search(&self, signer: &Signer, query: &str) -> Result<Vec<String>, SentimentError> {
        let mut texts = Vec::new();
        let mut max_id: Option<u64> = None;

        while texts.len() < self.scan_limit {
            let count = (self.scan_limit - texts.len()).min(PAGE_LIMIT).to_string();
            let max_id_param = max_id.map(|id| id.to_string());
            let mut params: Vec<(&str, &str)> = vec![
                ("q", query),
                ("count", count.as_str()),
                ("tweet_mode", "extended"),
            ];
            if let Some(id) = &max_id_param {
                params.push(("max_id", id.as_str()));
            }

            let response = self
                .signed_get(signer, "/1.1/search/tweets.json", &params)
                .await?;
            let body = response.text().await?;
            let page: SearchResponse =
                serde_json::from_str(&body).map_err(|source| SentimentError::Deserialize {
                    context: format!("search/tweets(q={query})"),
                    source,
                })?;

            let Some(lowest) = page.statuses.iter().map(|s| s.id).min() else {
                break;
            };
            let remaining = self.scan_limit - texts.len();
            texts.extend(page.statuses.into_iter().take(remaining).map(Status::into_text));

            if lowest == 0 {
                break;
            }
            max_id = Some(lowest - 1);
        }

        Ok(texts)
    }

    /// Fetch recent tweets for `query`, filtered by the English-only and
    /// no-retweet/no-mention policies.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Authorization`] if the PIN flow fails, or
    /// [`SentimentError::Twitter`] / [`SentimentError::Http`] if an API call
    /// fails.
    pub async fn recent_tweets(&self, query: &str) -> Result<Vec<TextItem>, SentimentError> {
        let access = self.authorize().await?;
        let signer = self.signer.with_token(&access.token, &access.secret);

        self.signed_get(&signer, "/1.1/account/verify_credentials.json", &[])
            .await?;

        let raw = self.search(&signer, query).await?;
        let scanned = raw.len();
        let kept = filter_tweets(raw, self.limit);

        tracing::debug!(query, scanned, kept = kept.len(), "collected Twitter texts");
        Ok(kept)
    }
}

#[async_trait]
impl TextSource for TwitterSource {
    fn name(&self) -> &'static str {
        "twitter"
    }

    async fn fetch(&self, query: &str) -> Result<Vec<TextItem>, SentimentError> {
        self.recent_tweets(query).await
    }
}

/// Retweets start with an `RT` token; mentions start with `@`.
pub(crate) fn is_retweet_or_mention(text: &str) -> bool {
    let text = text.trim_start();
    text.starts_with('@') || text.split_whitespace().next() == Some("RT")
}

/// Keep English, non-retweet, non-mention texts in order, up to `limit`.
pub(crate) fn filter_tweets(texts: Vec<String>, limit: usize) -> Vec<String> {
    texts
        .into_iter()
        .filter(|text| is_english(text))
        .filter(|text| !is_retweet_or_mention(text))
        .take(limit)
        .collect()
}
