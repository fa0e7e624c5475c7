//! Comparison of a reference filename against a synthesized one.
//!
//! Both names are split on `-`. The date occupies the first three segments,
//! the business name the fourth and the price the fifth. A business name that
//! itself contains `-` shifts every later segment; this decomposition does not
//! try to repair that and reports it through [`ComparisonResult::aligned`].

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

/// Number of `-`-delimited segments in a conforming filename.
const SEGMENTS: usize = 5;

/// Per-field equality of two filenames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Ground-truth filename.
    pub reference_name: String,
    /// Synthesized filename.
    pub computed_name: String,
    pub date_equal: bool,
    pub name_equal: bool,
    pub price_equal: bool,
    /// Both names had exactly five segments.
    pub aligned: bool,
}

/// Fields recovered from a filename by splitting on `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameParts {
    pub date: String,
    pub name: String,
    pub price: String,
    /// Total number of segments found.
    pub segments: usize,
}

impl FilenameParts {
    /// Split a filename. Fails when it has fewer than five segments.
    pub fn parse(filename: &str) -> Result<Self, ScoreError> {
        let lowered = filename.to_lowercase();
        let tokens: Vec<&str> = lowered.split('-').collect();

        if tokens.len() < SEGMENTS {
            return Err(ScoreError::MalformedName {
                name: filename.to_string(),
            });
        }

        Ok(Self {
            date: tokens[..3].join("-"),
            name: tokens[3].to_string(),
            price: strip_price(tokens[4]).to_string(),
            segments: tokens.len(),
        })
    }
}

/// Drop a trailing extension (`.pdf`, `.jp2`) and a leading `$`.
///
/// An extension has at least one letter, so the cents of `45.67` stay.
fn strip_price(token: &str) -> &str {
    let without_ext = match token.rsplit_once('.') {
        Some((stem, ext)) if is_extension(ext) => stem,
        _ => token,
    };
    without_ext.trim_start_matches('$')
}

fn is_extension(ext: &str) -> bool {
    ext.chars().all(|c| c.is_ascii_alphanumeric()) && ext.chars().any(|c| c.is_ascii_alphabetic())
}

/// Compare a reference filename with a computed one, field by field.
pub fn compare_filenames(reference: &str, computed: &str) -> Result<ComparisonResult, ScoreError> {
    let expected = FilenameParts::parse(reference)?;
    let actual = FilenameParts::parse(computed)?;

    Ok(ComparisonResult {
        reference_name: reference.to_string(),
        computed_name: computed.to_string(),
        date_equal: expected.date == actual.date,
        name_equal: expected.name == actual.name,
        price_equal: expected.price == actual.price,
        aligned: expected.segments == SEGMENTS && actual.segments == SEGMENTS,
    })
}
