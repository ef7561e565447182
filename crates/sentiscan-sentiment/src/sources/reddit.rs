//! Reddit subreddit listing source (script-app password grant).

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use sentiscan_core::RedditCredentials;
use serde::Deserialize;

use super::{SourceSettings, TextSource};
use crate::error::SentimentError;
use crate::types::TextItem;

const DEFAULT_AUTH_BASE_URL: &str = "https://www.reddit.com";
const DEFAULT_API_BASE_URL: &str = "https://oauth.reddit.com";
/// Reddit's maximum listing page size.
const PAGE_LIMIT: usize = 100;

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reddit listing wrapper.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Post>,
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    stickied: bool,
}

/// Titles of the newest posts in the subreddit named by the query.
///
/// The listing is read up to the configured limit and pinned (stickied) posts
/// are then dropped, so fewer than `limit` titles may come back.
pub struct RedditSource {
    client: reqwest::Client,
    credentials: RedditCredentials,
    auth_base_url: String,
    api_base_url: String,
    limit: usize,
}

impl RedditSource {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn new(
        credentials: RedditCredentials,
        settings: &SourceSettings,
    ) -> Result<Self, SentimentError> {
        Self::with_base_urls(
            credentials,
            settings,
            DEFAULT_AUTH_BASE_URL,
            DEFAULT_API_BASE_URL,
        )
    }

    /// Point the token and listing calls at custom hosts (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn with_base_urls(
        credentials: RedditCredentials,
        settings: &SourceSettings,
        auth_base_url: &str,
        api_base_url: &str,
    ) -> Result<Self, SentimentError> {
        Ok(Self {
            client: settings.http_client()?,
            credentials,
            auth_base_url: auth_base_url.trim_end_matches('/').to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            limit: settings.limit,
        })
    }

    async fn fetch_token(&self) -> Result<String, SentimentError> {
        let response = self
            .client
            .post(format!("{}/api/v1/access_token", self.auth_base_url))
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[
                ("grant_type", "password"),
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SentimentError::Reddit(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let token_resp: TokenResponse = response
            .json()
            .await
            .map_err(|e| SentimentError::Reddit(format!("token parse error: {e}")))?;

        Ok(token_resp.access_token)
    }

    /// Fetch the newest post titles of `subreddit`, skipping stickied posts.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Reddit`] if authentication or the listing
    /// request fails, or [`SentimentError::Http`] on network failure.
    pub async fn newest_titles(&self, subreddit: &str) -> Result<Vec<TextItem>, SentimentError> {
        let subreddit = subreddit.trim().trim_start_matches("r/");
        let token = self.fetch_token().await?;
        let endpoint = format!(
            "{}/r/{}/new",
            self.api_base_url,
            utf8_percent_encode(subreddit, NON_ALPHANUMERIC)
        );

        let mut titles = Vec::new();
        let mut seen = 0usize;
        let mut after: Option<String> = None;

        while seen < self.limit {
            let page_limit = (self.limit - seen).min(PAGE_LIMIT);
            let mut params: Vec<(&str, String)> = vec![
                ("limit", page_limit.to_string()),
                ("raw_json", "1".to_string()),
            ];
            if let Some(cursor) = &after {
                params.push(("after", cursor.clone()));
            }

            let response = self
                .client
                .get(&endpoint)
                .bearer_auth(&token)
                .query(&params)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(SentimentError::Reddit(format!(
                    "listing r/{subreddit} failed with status {}",
                    response.status()
                )));
            }

            let listing: Listing = response
                .json()
                .await
                .map_err(|e| SentimentError::Reddit(format!("Reddit response parse error: {e}")))?;

            if listing.data.children.is_empty() {
                break;
            }

            for post in listing.data.children.into_iter().take(self.limit - seen) {
                seen += 1;
                if post.data.stickied {
                    continue;
                }
                titles.push(post.data.title);
            }

            after = listing.data.after;
            if after.is_none() {
                break;
            }
        }

        tracing::debug!(
            subreddit,
            listed = seen,
            kept = titles.len(),
            "collected Reddit titles"
        );

        Ok(titles)
    }
}

#[async_trait]
impl TextSource for RedditSource {
    fn name(&self) -> &'static str {
        "reddit"
    }

    async fn fetch(&self, query: &str) -> Result<Vec<TextItem>, SentimentError> {
        self.newest_titles(query).await
    }
}
