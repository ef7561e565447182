use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single piece of raw short-form text from one source.
///
/// Items carry no identity beyond their content and are never deduplicated.
pub type TextItem = String;

/// Label key to integer percentage of all classified items.
///
/// Unclassifiable (blank) items are counted under the empty-string key.
pub type SentimentTally = BTreeMap<String, u32>;

/// The fixed label set a classifier may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SentimentLabel {
    type Err = String;

    /// Accepts the label spellings emitted by common sentiment models.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" | "label_1" => Ok(SentimentLabel::Positive),
            "negative" | "neg" | "label_0" => Ok(SentimentLabel::Negative),
            other => Err(format!("unrecognized sentiment label '{other}'")),
        }
    }
}

/// Outcome of classifying one text item.
///
/// Both fields are `None` for the "not scored" sentinel assigned to blank text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationResult {
    pub label: Option<SentimentLabel>,
    /// Classifier certainty in `[0.0, 1.0]`.
    pub confidence: Option<f32>,
}

impl ClassificationResult {
    #[must_use]
    pub fn unscored() -> Self {
        Self {
            label: None,
            confidence: None,
        }
    }

    #[must_use]
    pub fn scored(label: SentimentLabel, confidence: f32) -> Self {
        Self {
            label: Some(label),
            confidence: Some(confidence.clamp(0.0, 1.0)),
        }
    }

    #[must_use]
    pub fn is_unscored(&self) -> bool {
        self.label.is_none()
    }

    /// Key this result is tallied under; `""` for the sentinel.
    #[must_use]
    pub fn label_key(&self) -> &'static str {
        self.label.map_or("", SentimentLabel::as_str)
    }
}

/// Result of one pipeline run, before it is written out.
#[derive(Debug, Clone)]
pub struct SentimentReport {
    pub keyword: String,
    /// Items fetched per source, keyed by source name.
    pub source_counts: BTreeMap<&'static str, usize>,
    /// Number of aggregated items that went through the classifier adapter.
    pub item_count: usize,
    pub tally: SentimentTally,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_parses_model_spellings() {
        assert_eq!("POSITIVE".parse(), Ok(SentimentLabel::Positive));
        assert_eq!("Negative".parse(), Ok(SentimentLabel::Negative));
        assert_eq!("LABEL_1".parse(), Ok(SentimentLabel::Positive));
        assert_eq!("neg".parse(), Ok(SentimentLabel::Negative));
        assert!("neutral".parse::<SentimentLabel>().is_err());
    }

    #[test]
    fn sentinel_tallies_under_empty_key() {
        let result = ClassificationResult::unscored();
        assert!(result.is_unscored());
        assert_eq!(result.label_key(), "");
        assert!(result.confidence.is_none());
    }

    #[test]
    fn scored_result_clamps_confidence() {
        let result = ClassificationResult::scored(SentimentLabel::Positive, 1.3);
        assert_eq!(result.confidence, Some(1.0));
        assert_eq!(result.label_key(), "positive");
    }

    #[test]
    fn label_serializes_lowercase() {
        let json = serde_json::to_string(&SentimentLabel::Negative).unwrap();
        assert_eq!(json, "\"negative\"");
    }
}
