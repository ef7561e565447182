use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("configuration error: {0}")]
    Config(#[from] sentiscan_core::ConfigError),

    #[error("Reddit API error: {0}")]
    Reddit(String),

    #[error("Twitter API error: {0}")]
    Twitter(String),

    #[error("authorization failed: {0}")]
    Authorization(String),

    #[error("classifier error: {0}")]
    Classifier(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode sentiment tally: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("keyword must not be blank")]
    EmptyKeyword,

    #[error("no text items were collected; cannot compute percentages")]
    EmptyInput,
}
