//! Label frequency tally.
//!
//! Percentages use truncating integer division and are not renormalized, so a
//! tally may sum to less than 100.

use std::collections::BTreeMap;

use crate::error::SentimentError;
use crate::types::SentimentTally;

/// `floor(100 * count / total)` in integer arithmetic.
///
/// Returns `None` when `total` is zero.
#[must_use]
pub fn percentage(count: usize, total: usize) -> Option<u32> {
    let pct = count.saturating_mul(100).checked_div(total)?;
    Some(u32::try_from(pct).unwrap_or(u32::MAX))
}

/// Count each distinct label key and convert the counts to percentages.
///
/// Empty-sentinel entries (`""`) are counted like any other key.
///
/// # Errors
///
/// Returns [`SentimentError::EmptyInput`] when `labels` is empty.
pub fn tally<'a, I>(labels: I) -> Result<SentimentTally, SentimentError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut total = 0usize;
    for label in labels {
        *counts.entry(label).or_default() += 1;
        total += 1;
    }

    if total == 0 {
        return Err(SentimentError::EmptyInput);
    }

    counts
        .into_iter()
        .map(|(label, count)| {
            let pct = percentage(count, total).ok_or(SentimentError::EmptyInput)?;
            Ok((label.to_string(), pct))
        })
        .collect()
}
