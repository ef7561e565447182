//! Keyword sentiment pipeline.
//!
//! Collects short texts about one keyword from Reddit, Google News RSS and
//! Twitter search, classifies each text as positive or negative, and tallies
//! the label distribution as integer percentages written to a JSON file.

pub mod aggregate;
pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod scorer;
pub mod sources;
pub mod types;
pub mod writer;

pub use aggregate::aggregate;
pub use classifier::{
    build_classifier, classify_item, Classifier, LexiconClassifier, Prediction, TeiClassifier,
};
pub use error::SentimentError;
pub use pipeline::SentimentPipeline;
pub use scorer::{percentage, tally};
pub use sources::{
    GoogleNewsSource, PinAuthorizer, RedditSource, SourceSettings, TerminalPinPrompt, TextSource,
    TwitterSource,
};
pub use types::{
    ClassificationResult, SentimentLabel, SentimentReport, SentimentTally, TextItem,
};
pub use writer::{read_tally, write_tally};
