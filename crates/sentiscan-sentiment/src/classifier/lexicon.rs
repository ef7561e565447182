//! Offline word-weight classifier.

use async_trait::async_trait;

use super::{Classifier, Prediction};
use crate::error::SentimentError;
use crate::types::SentimentLabel;

/// Word weights for headline and post sentiment.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("positive", 0.4),
    ("love", 0.5),
    ("loved", 0.5),
    ("best", 0.5),
    ("recommend", 0.4),
    ("quality", 0.3),
    ("popular", 0.3),
    ("growing", 0.3),
    ("growth", 0.3),
    ("thriving", 0.5),
    ("win", 0.4),
    ("wins", 0.4),
    ("beat", 0.3),
    ("beats", 0.3),
    ("record", 0.3),
    ("surge", 0.4),
    ("soars", 0.5),
    ("gain", 0.3),
    ("gains", 0.3),
    ("profit", 0.3),
    ("launch", 0.2),
    ("innovative", 0.4),
    ("amazing", 0.5),
    ("happy", 0.4),
    ("upgrade", 0.3),
    // Negative signals
    ("bad", -0.4),
    ("terrible", -0.6),
    ("worst", -0.6),
    ("awful", -0.6),
    ("hate", -0.5),
    ("failed", -0.4),
    ("failure", -0.4),
    ("problem", -0.3),
    ("concern", -0.3),
    ("warning", -0.4),
    ("lawsuit", -0.5),
    ("sued", -0.5),
    ("fraud", -0.7),
    ("recall", -0.6),
    ("scandal", -0.6),
    ("layoffs", -0.5),
    ("loss", -0.4),
    ("losses", -0.4),
    ("plunge", -0.5),
    ("plunges", -0.5),
    ("crash", -0.6),
    ("drop", -0.3),
    ("falls", -0.3),
    ("decline", -0.3),
    ("broken", -0.4),
    ("outage", -0.5),
    ("bankrupt", -0.7),
    ("bankruptcy", -0.7),
];

/// Sum matching word weights and clamp to `[-1.0, 1.0]`.
///
/// Returns `0.0` for empty or unknown text.
#[must_use]
pub(crate) fn lexicon_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        for &(lex_word, weight) in LEXICON {
            if w == lex_word {
                score += weight;
                break;
            }
        }
    }
    score.clamp(-1.0, 1.0)
}

/// Classifier backed by [`LEXICON`].
///
/// A negative score is `negative`, anything else `positive`; confidence is
/// `0.5 + |score| / 2`, so text with no lexicon hits is a coin flip.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconClassifier;

#[async_trait]
impl Classifier for LexiconClassifier {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    async fn predict(&self, text: &str) -> Result<Prediction, SentimentError> {
        let score = lexicon_score(text);
        let label = if score < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Positive
        };
        Ok(Prediction {
            label,
            score: 0.5 + score.abs() / 2.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_returns_zero() {
        assert!(lexicon_score("").abs() < f32::EPSILON);
    }

    #[test]
    fn unknown_text_returns_zero() {
        assert!(lexicon_score("the quick brown fox").abs() < f32::EPSILON);
    }

    #[test]
    fn punctuation_stripped_from_words() {
        let score = lexicon_score("great!");
        assert!(score > 0.0, "expected positive score for 'great!', got {score}");
    }

    #[test]
    fn score_clamps_to_negative_one() {
        let text = "fraud bankrupt crash scandal lawsuit worst";
        assert!((lexicon_score(text) + 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn score_clamps_to_positive_one() {
        let text = "great excellent best love recommend amazing soars";
        assert!((lexicon_score(text) - 1.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn negative_text_is_labelled_negative() {
        let prediction = LexiconClassifier
            .predict("Shares plunge after fraud lawsuit")
            .await
            .unwrap();
        assert_eq!(prediction.label, SentimentLabel::Negative);
        assert!(prediction.score > 0.5 && prediction.score <= 1.0);
    }

    #[tokio::test]
    async fn neutral_text_is_positive_at_half_confidence() {
        let prediction = LexiconClassifier.predict("quarterly call today").await.unwrap();
        assert_eq!(prediction.label, SentimentLabel::Positive);
        assert!((prediction.score - 0.5).abs() < f32::EPSILON);
    }
}
