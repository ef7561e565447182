//! Sentiment classifier abstraction and the per-item adapter.

mod lexicon;
mod tei;

pub use lexicon::LexiconClassifier;
pub use tei::TeiClassifier;

use async_trait::async_trait;
use sentiscan_core::{AppConfig, ClassifierBackend};

use crate::error::SentimentError;
use crate::types::{ClassificationResult, SentimentLabel};

/// Top-ranked prediction for one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: SentimentLabel,
    /// Certainty in `[0.0, 1.0]`.
    pub score: f32,
}

/// A pretrained (or rule-based) sentiment classifier.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Classify one non-blank text.
    async fn predict(&self, text: &str) -> Result<Prediction, SentimentError>;
}

/// Classify one item, assigning the empty sentinel to blank text.
///
/// The classifier is called exactly once for non-blank text and never for
/// blank text.
///
/// # Errors
///
/// Propagates any classifier error unchanged.
pub async fn classify_item(
    classifier: &dyn Classifier,
    text: &str,
) -> Result<ClassificationResult, SentimentError> {
    if text.trim().is_empty() {
        return Ok(ClassificationResult::unscored());
    }
    let prediction = classifier.predict(text).await?;
    Ok(ClassificationResult::scored(
        prediction.label,
        prediction.score,
    ))
}

/// Build the classifier for `backend`, using `config` for TEI connection settings.
///
/// # Errors
///
/// Returns [`SentimentError::Http`] if the TEI HTTP client cannot be built.
pub fn build_classifier(
    config: &AppConfig,
    backend: ClassifierBackend,
) -> Result<Box<dyn Classifier>, SentimentError> {
    Ok(match backend {
        ClassifierBackend::Tei => Box::new(TeiClassifier::new(
            &config.tei_url,
            config.request_timeout_secs,
        )?),
        ClassifierBackend::Lexicon => Box::new(LexiconClassifier),
    })
}
