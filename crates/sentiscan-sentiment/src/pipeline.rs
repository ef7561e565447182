//! Sentiment pipeline orchestration.

use std::collections::BTreeMap;
use std::path::Path;

use crate::aggregate::aggregate;
use crate::classifier::{classify_item, Classifier};
use crate::error::SentimentError;
use crate::scorer::tally;
use crate::sources::TextSource;
use crate::types::{SentimentReport, TextItem};
use crate::writer::write_tally;

/// The three text sources and the classifier for one run.
pub struct SentimentPipeline {
    forum: Box<dyn TextSource>,
    news: Box<dyn TextSource>,
    microblog: Box<dyn TextSource>,
    classifier: Box<dyn Classifier>,
}

impl SentimentPipeline {
    #[must_use]
    pub fn new(
        forum: Box<dyn TextSource>,
        news: Box<dyn TextSource>,
        microblog: Box<dyn TextSource>,
        classifier: Box<dyn Classifier>,
    ) -> Self {
        Self {
            forum,
            news,
            microblog,
            classifier,
        }
    }

    async fn fetch_from(
        source: &dyn TextSource,
        keyword: &str,
        counts: &mut BTreeMap<&'static str, usize>,
    ) -> Result<Vec<TextItem>, SentimentError> {
        let items = source.fetch(keyword).await?;
        tracing::debug!(
            source = source.name(),
            count = items.len(),
            "collected source texts"
        );
        *counts.entry(source.name()).or_default() += items.len();
        Ok(items)
    }

    /// Run the pipeline for one keyword.
    ///
    /// 1. Fetch forum, news and microblog texts, one source after another.
    /// 2. Concatenate them in that order.
    /// 3. Classify every item (blank items get the empty sentinel).
    /// 4. Tally label percentages.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::EmptyKeyword`] for a blank keyword,
    /// [`SentimentError::EmptyInput`] when no source returned anything, and
    /// otherwise the first source or classifier error encountered.
    pub async fn run(&self, keyword: &str) -> Result<SentimentReport, SentimentError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(SentimentError::EmptyKeyword);
        }

        let mut source_counts = BTreeMap::new();
        let forum = Self::fetch_from(self.forum.as_ref(), keyword, &mut source_counts).await?;
        let news = Self::fetch_from(self.news.as_ref(), keyword, &mut source_counts).await?;
        let microblog =
            Self::fetch_from(self.microblog.as_ref(), keyword, &mut source_counts).await?;

        let items = aggregate(forum, news, microblog);

        let mut results = Vec::with_capacity(items.len());
        for item in &items {
            results.push(classify_item(self.classifier.as_ref(), item).await?);
        }

        let unscored = results.iter().filter(|r| r.is_unscored()).count();
        let tally = tally(results.iter().map(|r| r.label_key()))?;

        tracing::info!(
            keyword,
            classifier = self.classifier.name(),
            items = items.len(),
            unscored,
            source_counts = ?source_counts,
            tally = ?tally,
            "sentiment tally computed"
        );

        Ok(SentimentReport {
            keyword: keyword.to_string(),
            source_counts,
            item_count: items.len(),
            tally,
        })
    }

    /// Run the pipeline and write the tally to `output`.
    ///
    /// # Errors
    ///
    /// Any error from [`SentimentPipeline::run`] or [`write_tally`].
    pub async fn run_and_write(
        &self,
        keyword: &str,
        output: &Path,
    ) -> Result<SentimentReport, SentimentError> {
        let report = self.run(keyword).await?;
        write_tally(output, &report.tally)?;
        Ok(report)
    }
}
