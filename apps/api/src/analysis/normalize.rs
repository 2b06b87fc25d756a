//! Text normalization, the first stage of every pipeline.
//!
//! Decoded text arrives with decomposed Unicode forms, ligatures, and
//! irregular whitespace depending on the source format. Everything
//! downstream (section extraction, scoring, matching) assumes the
//! canonical single-line form produced here.

use unicode_normalization::UnicodeNormalization;

use crate::errors::AppError;

/// Applies NFKD normalization, collapses all whitespace runs (including
/// newlines) into single spaces, and trims the ends.
///
/// The only error raised is `EmptyDocument`, when nothing usable
/// remains; callers abort the whole pipeline for that document on it.
pub fn normalize_text(raw: &str) -> Result<String, AppError> {
    let decomposed: String = raw.nfkd().collect();
    let collapsed = decomposed.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return Err(AppError::EmptyDocument);
    }
    Ok(collapsed)
}
