mod sentiment;

use std::path::PathBuf;

use clap::Parser;
use sentiscan_core::ClassifierBackend;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sentiscan")]
#[command(about = "Keyword sentiment from Reddit, Google News and Twitter")]
struct Cli {
    /// Search keyword; prompted for interactively when omitted
    #[arg(long, short)]
    keyword: Option<String>,

    /// Result file (defaults to `SENTISCAN_OUTPUT_PATH` or `sentimentvalue.json`)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Classifier backend: `tei` or `lexicon` (defaults to `SENTISCAN_CLASSIFIER`)
    #[arg(long)]
    classifier: Option<ClassifierBackend>,

    /// Print the existing result file instead of running the pipeline
    #[arg(long)]
    show: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = sentiscan_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let output = cli.output.unwrap_or_else(|| config.output_path.clone());

    if cli.show {
        return sentiment::run_show(&output);
    }

    let keyword = match cli.keyword {
        Some(keyword) => keyword,
        None => sentiment::prompt_keyword(std::io::stdin().lock(), std::io::stdout().lock())?,
    };
    let backend = cli.classifier.unwrap_or(config.classifier);

    sentiment::run_sentiment(&config, backend, &keyword, &output).await
}
