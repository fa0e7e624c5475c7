//! Receipt text and the record resolved from it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Text of a single receipt, one entry per OCR-detected line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptText {
    lines: Vec<String>,
}

impl ReceiptText {
    /// Create receipt text from already split lines.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Split raw extracted text on newlines. Blank lines are kept.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.split('\n').map(|l| l.trim_end_matches('\r')))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Lowercased copies of every line, used for case-insensitive matching.
    pub fn lowercase_lines(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.to_lowercase()).collect()
    }
}

/// Fields resolved from a receipt. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Canonical business name (e.g. "costco").
    pub business_name: String,

    /// Transaction date; `1970-01-01` when none was found.
    pub transaction_date: NaiveDate,

    /// Receipt total; zero when no amount was found.
    pub total: Decimal,
}

impl ExtractedRecord {
    pub fn new(business_name: impl Into<String>, transaction_date: NaiveDate, total: Decimal) -> Self {
        Self {
            business_name: business_name.into(),
            transaction_date,
            total,
        }
    }
}
