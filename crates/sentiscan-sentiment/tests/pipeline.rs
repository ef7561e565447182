//! End-to-end pipeline tests with in-memory sources and classifiers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sentiscan_sentiment::{
    read_tally, Classifier, Prediction, SentimentError, SentimentLabel, SentimentPipeline,
    TextItem, TextSource,
};

struct FixedSource {
    name: &'static str,
    items: Vec<&'static str>,
    log: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl TextSource for FixedSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, _query: &str) -> Result<Vec<TextItem>, SentimentError> {
        self.log.lock().unwrap().push(self.name);
        Ok(self.items.iter().map(ToString::to_string).collect())
    }
}

struct FailingSource;

#[async_trait]
impl TextSource for FailingSource {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn fetch(&self, _query: &str) -> Result<Vec<TextItem>, SentimentError> {
        Err(SentimentError::Reddit("token exchange failed with status 401".to_string()))
    }
}

/// Looks each text up in a table of canned predictions.
struct TableClassifier {
    table: HashMap<&'static str, (SentimentLabel, f32)>,
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Classifier for TableClassifier {
    fn name(&self) -> &'static str {
        "table"
    }

    async fn predict(&self, text: &str) -> Result<Prediction, SentimentError> {
        self.calls.lock().unwrap().push(text.to_string());
        let (label, score) = self
            .table
            .get(text)
            .copied()
            .ok_or_else(|| SentimentError::Classifier(format!("no prediction for '{text}'")))?;
        Ok(Prediction { label, score })
    }
}

struct Fixture {
    pipeline: SentimentPipeline,
    fetch_log: Arc<Mutex<Vec<&'static str>>>,
    classified: Arc<Mutex<Vec<String>>>,
}

fn fixture(
    forum: Vec<&'static str>,
    news: Vec<&'static str>,
    microblog: Vec<&'static str>,
) -> Fixture {
    let fetch_log = Arc::new(Mutex::new(Vec::new()));
    let classified = Arc::new(Mutex::new(Vec::new()));
    let source = |name: &'static str, items: Vec<&'static str>| -> Box<dyn TextSource> {
        Box::new(FixedSource {
            name,
            items,
            log: Arc::clone(&fetch_log),
        })
    };

    let table = HashMap::from([
        ("a", (SentimentLabel::Positive, 0.9)),
        ("b", (SentimentLabel::Negative, 0.6)),
        ("c", (SentimentLabel::Positive, 0.9)),
        ("d", (SentimentLabel::Negative, 0.8)),
    ]);
    let classifier = TableClassifier {
        table,
        calls: Arc::clone(&classified),
    };

    Fixture {
        pipeline: SentimentPipeline::new(
            source("reddit", forum),
            source("google_news", news),
            source("twitter", microblog),
            Box::new(classifier),
        ),
        fetch_log,
        classified,
    }
}

#[tokio::test]
async fn two_positive_one_negative_tallies_66_33() {
    let fx = fixture(vec!["a", "b"], vec!["c"], vec![]);
    let report = fx.pipeline.run("acme").await.unwrap();

    assert_eq!(report.keyword, "acme");
    assert_eq!(report.item_count, 3);
    assert_eq!(report.tally.len(), 2);
    assert_eq!(report.tally["positive"], 66);
    assert_eq!(report.tally["negative"], 33);
    assert_eq!(report.source_counts["reddit"], 2);
    assert_eq!(report.source_counts["google_news"], 1);
    assert_eq!(report.source_counts["twitter"], 0);
}

/// Shared buffer the fmt subscriber writes log lines into.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn final_tally_event_logs_per_source_counts() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let fx = fixture(vec!["a", "b"], vec!["c"], vec![]);
    fx.pipeline.run("acme").await.unwrap();

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    let line = output
        .lines()
        .find(|l| l.contains("sentiment tally computed"))
        .expect("final tally event should be logged");
    assert!(line.contains(r#""reddit": 2"#), "line was: {line}");
    assert!(line.contains(r#""google_news": 1"#), "line was: {line}");
    assert!(line.contains(r#""twitter": 0"#), "line was: {line}");
}

#[tokio::test]
async fn sources_fetched_and_classified_in_fixed_order() {
    let fx = fixture(vec!["b"], vec!["a", "c"], vec!["d"]);
    fx.pipeline.run("acme").await.unwrap();

    assert_eq!(
        *fx.fetch_log.lock().unwrap(),
        vec!["reddit", "google_news", "twitter"]
    );
    assert_eq!(*fx.classified.lock().unwrap(), vec!["b", "a", "c", "d"]);
}

#[tokio::test]
async fn blank_items_count_under_empty_key_without_classifier_call() {
    let fx = fixture(vec!["a", "   "], vec![""], vec!["b"]);
    let report = fx.pipeline.run("acme").await.unwrap();

    assert_eq!(report.tally[""], 50);
    assert_eq!(report.tally["positive"], 25);
    assert_eq!(report.tally["negative"], 25);
    assert_eq!(*fx.classified.lock().unwrap(), vec!["a", "b"]);
}

#[tokio::test]
async fn no_items_is_empty_input_error() {
    let fx = fixture(vec![], vec![], vec![]);
    let err = fx.pipeline.run("acme").await.unwrap_err();
    assert!(matches!(err, SentimentError::EmptyInput), "got {err:?}");
}

#[tokio::test]
async fn blank_keyword_is_rejected_before_fetching() {
    let fx = fixture(vec!["a"], vec![], vec![]);
    let err = fx.pipeline.run("  ").await.unwrap_err();
    assert!(matches!(err, SentimentError::EmptyKeyword));
    assert!(fx.fetch_log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn classifier_failure_stops_the_run() {
    let fx = fixture(vec!["a", "unknown"], vec![], vec![]);
    let err = fx.pipeline.run("acme").await.unwrap_err();
    assert!(matches!(err, SentimentError::Classifier(_)), "got {err:?}");
}

#[tokio::test]
async fn source_failure_stops_the_run() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let pipeline = SentimentPipeline::new(
        Box::new(FailingSource),
        Box::new(FixedSource {
            name: "google_news",
            items: vec!["a"],
            log: Arc::clone(&log),
        }),
        Box::new(FixedSource {
            name: "twitter",
            items: vec!["b"],
            log: Arc::clone(&log),
        }),
        Box::new(sentiscan_sentiment::LexiconClassifier),
    );

    let err = pipeline.run("acme").await.unwrap_err();
    assert!(matches!(err, SentimentError::Reddit(_)), "got {err:?}");
    assert!(log.lock().unwrap().is_empty(), "later sources must not run");
}

#[tokio::test]
async fn run_and_write_round_trips_through_the_file() {
    let fx = fixture(vec!["a", "b"], vec!["c"], vec!["d", ""]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sentimentvalue.json");

    let report = fx.pipeline.run_and_write("acme", &path).await.unwrap();
    let written = read_tally(&path).unwrap();

    assert_eq!(written, report.tally);
    assert_eq!(written["positive"], 40);
    assert_eq!(written["negative"], 40);
    assert_eq!(written[""], 20);
}

#[tokio::test]
async fn no_file_written_when_run_fails() {
    let fx = fixture(vec![], vec![], vec![]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sentimentvalue.json");

    assert!(fx.pipeline.run_and_write("acme", &path).await.is_err());
    assert!(!path.exists());
}
