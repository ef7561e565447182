//! Concatenation of per-source text collections.

use crate::types::TextItem;

/// Concatenate the three source collections in fixed order: forum, news, microblog.
///
/// Items are neither deduplicated nor reordered; empty inputs are allowed.
#[must_use]
pub fn aggregate(
    forum: Vec<TextItem>,
    news: Vec<TextItem>,
    microblog: Vec<TextItem>,
) -> Vec<TextItem> {
    let mut all = Vec::with_capacity(forum.len() + news.len() + microblog.len());
    all.extend(forum);
    all.extend(news);
    all.extend(microblog);
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(texts: &[&str]) -> Vec<TextItem> {
        texts.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn preserves_source_order_and_length() {
        let all = aggregate(items(&["f1", "f2"]), items(&["n1"]), items(&["m1", "m2", "m3"]));
        assert_eq!(all.len(), 6);
        assert_eq!(all, items(&["f1", "f2", "n1", "m1", "m2", "m3"]));
    }

    #[test]
    fn accepts_empty_sources() {
        assert!(aggregate(vec![], vec![], vec![]).is_empty());
        assert_eq!(aggregate(vec![], items(&["n"]), vec![]), items(&["n"]));
    }

    #[test]
    fn keeps_duplicates_across_sources() {
        let all = aggregate(items(&["same"]), items(&["same"]), items(&["same"]));
        assert_eq!(all, items(&["same", "same", "same"]));
    }
}
