//! English-only policy for microblog text.
//!
//! Detection runs on the raw text with `whatlang`. Text whose language cannot
//! be detected at all is treated as a detection failure and dropped by the
//! caller, the same as text detected as another language.

use whatlang::Lang;

/// `Some(true)` for English, `Some(false)` for another language, `None` when
/// no language could be detected.
#[must_use]
pub fn detect_english(text: &str) -> Option<bool> {
    whatlang::detect(text).map(|info| info.lang() == Lang::Eng)
}

/// Whether `text` passes the English-only policy.
#[must_use]
pub fn is_english(text: &str) -> bool {
    match detect_english(text) {
        Some(english) => english,
        None => {
            tracing::debug!("language detection failed; dropping text");
            false
        }
    }
}
