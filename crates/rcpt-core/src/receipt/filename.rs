//! Canonical receipt filename synthesis.
//!
//! Format: `<YYYY-MM-DD>-<business name>-$<total>`. The business name is not
//! escaped, so a name containing `-` cannot be split back reliably.

use rust_decimal::Decimal;

use crate::models::record::ExtractedRecord;

impl ExtractedRecord {
    /// Filename without extension.
    pub fn file_stem(&self) -> String {
        format!(
            "{}-{}-${}",
            self.transaction_date.format("%Y-%m-%d"),
            self.business_name,
            format_total(self.total)
        )
    }

    /// Filename with `.ext` appended.
    pub fn file_name(&self, extension: &str) -> String {
        let extension = extension.trim_start_matches('.');
        if extension.is_empty() {
            self.file_stem()
        } else {
            format!("{}.{}", self.file_stem(), extension)
        }
    }
}

/// Render a total without padding: trailing zeros dropped, one fractional digit kept.
pub fn format_total(total: Decimal) -> String {
    let normalized = total.normalize();
    if normalized.scale() == 0 {
        format!("{}.0", normalized)
    } else {
        normalized.to_string()
    }
}
