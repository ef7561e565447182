//! Google News RSS headline source.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use quick_xml::events::Event;
use quick_xml::Reader;

use super::{SourceSettings, TextSource};
use crate::error::SentimentError;
use crate::types::TextItem;

const DEFAULT_BASE_URL: &str = "https://news.google.com";

/// Headline titles from the Google News RSS search feed (US English edition).
pub struct GoogleNewsSource {
    client: reqwest::Client,
    base_url: String,
    limit: usize,
}

impl GoogleNewsSource {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn new(settings: &SourceSettings) -> Result<Self, SentimentError> {
        Self::with_base_url(settings, DEFAULT_BASE_URL)
    }

    /// Point the source at a custom host (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(settings: &SourceSettings, base_url: &str) -> Result<Self, SentimentError> {
        Ok(Self {
            client: settings.http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            limit: settings.limit,
        })
    }

    fn search_url(&self, query: &str) -> String {
        let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC).to_string();
        format!(
            "{}/rss/search?q={encoded}&hl=en-US&gl=US&ceid=US:en",
            self.base_url
        )
    }

    /// Fetch headline titles for `query`, in feed order.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] on network failure or non-2xx status,
    /// or [`SentimentError::Xml`] on a malformed feed.
    pub async fn headlines(&self, query: &str) -> Result<Vec<TextItem>, SentimentError> {
        let body = self
            .client
            .get(self.search_url(query))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_rss_titles(&body, self.limit)
    }
}

#[async_trait]
impl TextSource for GoogleNewsSource {
    fn name(&self) -> &'static str {
        "google_news"
    }

    async fn fetch(&self, query: &str) -> Result<Vec<TextItem>, SentimentError> {
        self.headlines(query).await
    }
}

/// Parse `<item><title>` values from an RSS body, keeping at most `max_items`.
///
/// Items with an empty title are kept as empty strings.
///
/// # Errors
///
/// Returns [`SentimentError::Xml`] if the XML is malformed.
pub(crate) fn parse_rss_titles(
    xml: &str,
    max_items: usize,
) -> Result<Vec<TextItem>, SentimentError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut titles = Vec::new();
    let mut current_title = String::new();
    let mut in_item = false;
    let mut in_title = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"item" => {
                    in_item = true;
                    current_title.clear();
                }
                b"title" if in_item => in_title = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"item" if in_item => {
                    in_item = false;
                    titles.push(std::mem::take(&mut current_title));
                    if titles.len() >= max_items {
                        break;
                    }
                }
                b"title" => in_title = false,
                _ => {}
            },
            Ok(Event::Text(e)) if in_title => match e.unescape() {
                Ok(text) => current_title.push_str(&text),
                Err(err) => {
                    let raw = String::from_utf8_lossy(e.as_ref());
                    tracing::warn!(error = %err, title = %raw, "keeping undecodable RSS title text as-is");
                    current_title.push_str(&raw);
                }
            },
            Ok(Event::CData(e)) if in_title => {
                current_title.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SentimentError::Xml(e)),
            _ => {}
        }
    }

    Ok(titles)
}
