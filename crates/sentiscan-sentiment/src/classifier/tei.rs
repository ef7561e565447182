//! TEI (Text Embeddings Inference) client for a sequence-classification model.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Classifier, Prediction};
use crate::error::SentimentError;
use crate::types::SentimentLabel;

/// TEI HTTP client calling `POST {url}/predict`.
pub struct TeiClassifier {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

/// TEI returns a ranked list for one input; some deployments return a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictResponse {
    Ranked(Vec<LabelScore>),
    Single(LabelScore),
}

impl TeiClassifier {
    /// Create a new `TeiClassifier`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn new(tei_url: &str, timeout_secs: u64) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/predict", tei_url.trim_end_matches('/')),
        })
    }

    fn top_prediction(response: PredictResponse) -> Result<Prediction, SentimentError> {
        let best = match response {
            PredictResponse::Single(single) => single,
            PredictResponse::Ranked(ranked) => ranked
                .into_iter()
                .max_by(|a, b| a.score.total_cmp(&b.score))
                .ok_or_else(|| SentimentError::Classifier("TEI returned no labels".to_string()))?,
        };

        let label = best
            .label
            .parse::<SentimentLabel>()
            .map_err(SentimentError::Classifier)?;

        Ok(Prediction {
            label,
            score: best.score.clamp(0.0, 1.0),
        })
    }
}

#[async_trait]
impl Classifier for TeiClassifier {
    fn name(&self) -> &'static str {
        "tei"
    }

    async fn predict(&self, text: &str) -> Result<Prediction, SentimentError> {
        let response = self
            .client
            .post(&self.url)
            .json(&PredictRequest { inputs: text })
            .send()
            .await
            .map_err(|e| SentimentError::Classifier(format!("TEI request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SentimentError::Classifier(format!(
                "TEI returned status {}",
                response.status()
            )));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| SentimentError::Classifier(format!("TEI response parse error: {e}")))?;

        Self::top_prediction(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> PredictResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn picks_highest_scoring_label() {
        let body = parse(
            r#"[{"label":"NEGATIVE","score":0.12},{"label":"POSITIVE","score":0.88}]"#,
        );
        let prediction = TeiClassifier::top_prediction(body).unwrap();
        assert_eq!(prediction.label, SentimentLabel::Positive);
        assert!((prediction.score - 0.88).abs() < 1e-6);
    }

    #[test]
    fn accepts_single_object() {
        let body = parse(r#"{"label":"LABEL_0","score":0.7}"#);
        let prediction = TeiClassifier::top_prediction(body).unwrap();
        assert_eq!(prediction.label, SentimentLabel::Negative);
    }

    #[test]
    fn empty_ranking_is_an_error() {
        let err = TeiClassifier::top_prediction(parse("[]")).unwrap_err();
        assert!(matches!(err, SentimentError::Classifier(_)));
    }

    #[test]
    fn unknown_label_is_an_error() {
        let body = parse(r#"[{"label":"neutral","score":0.9}]"#);
        let err = TeiClassifier::top_prediction(body).unwrap_err();
        assert!(matches!(err, SentimentError::Classifier(ref m) if m.contains("neutral")));
    }

    #[test]
    fn strips_trailing_slash_from_url() {
        let classifier = TeiClassifier::new("http://tei:8080/", 5).unwrap();
        assert_eq!(classifier.url, "http://tei:8080/predict");
    }
}
