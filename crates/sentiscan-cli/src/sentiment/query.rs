//! Read-only views of a written tally.

use std::path::Path;

use sentiscan_sentiment::{read_tally, SentimentTally};

/// Render a tally as an aligned two-column table.
///
/// The empty key (unclassifiable items) is shown as `(blank)`.
pub(crate) fn render_tally(tally: &SentimentTally) -> String {
    let mut out = format!("{:<12}PERCENT\n", "LABEL");
    for (label, pct) in tally {
        let label = if label.is_empty() { "(blank)" } else { label };
        out.push_str(&format!("{label:<12}{pct}\n"));
    }
    out
}

/// Print the tally stored at `path`.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed.
pub(crate) fn run_show(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        println!(
            "no result file at {}; run `sentiscan` first",
            path.display()
        );
        return Ok(());
    }

    let tally = read_tally(path)?;
    print!("{}", render_tally(&tally));
    Ok(())
}
