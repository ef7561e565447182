//! Sentiment command handlers for the CLI.

mod query;

use std::io::{BufRead, Write};
use std::path::Path;

use sentiscan_core::{AppConfig, ClassifierBackend};
use sentiscan_sentiment::{
    build_classifier, GoogleNewsSource, RedditSource, SentimentPipeline, SourceSettings,
    TerminalPinPrompt, TwitterSource,
};

pub(crate) use query::{render_tally, run_show};

/// Ask for the keyword on `output` and read one line from `input`.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or the line is blank.
pub(crate) fn prompt_keyword<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> anyhow::Result<String> {
    write!(output, "Enter company name: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let keyword = line.trim();
    if keyword.is_empty() {
        anyhow::bail!("no keyword entered");
    }
    Ok(keyword.to_string())
}

/// Wire the three sources and the selected classifier from `config`.
///
/// # Errors
///
/// Returns an error if a source's credentials are missing or an HTTP client
/// cannot be built.
pub(crate) fn build_pipeline(
    config: &AppConfig,
    backend: ClassifierBackend,
) -> anyhow::Result<SentimentPipeline> {
    let settings = SourceSettings::from_config(config);

    let forum = RedditSource::new(config.reddit_credentials()?, &settings)?;
    let news = GoogleNewsSource::new(&settings)?;
    let microblog = TwitterSource::new(
        &config.twitter_credentials()?,
        Box::new(TerminalPinPrompt),
        &settings,
    )?;
    let classifier = build_classifier(config, backend)?;

    Ok(SentimentPipeline::new(
        Box::new(forum),
        Box::new(news),
        Box::new(microblog),
        classifier,
    ))
}

/// Run the pipeline for `keyword` and write the tally to `output`.
///
/// # Errors
///
/// Returns the first configuration, source, classifier or I/O error.
pub(crate) async fn run_sentiment(
    config: &AppConfig,
    backend: ClassifierBackend,
    keyword: &str,
    output: &Path,
) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config, backend)?;
    let report = pipeline.run_and_write(keyword, output).await?;

    tracing::info!(
        keyword = %report.keyword,
        items = report.item_count,
        output = %output.display(),
        "sentiment run complete"
    );

    println!(
        "sentiment for '{}' from {} items written to {}",
        report.keyword,
        report.item_count,
        output.display()
    );
    print!("{}", render_tally(&report.tally));
    Ok(())
}
