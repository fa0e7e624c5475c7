//! Receipt field resolution and filename synthesis.

pub mod filename;
pub mod rules;

pub use filename::format_total;
pub use rules::FieldResolver;

use tracing::{debug, warn};

use crate::models::config::ExtractionConfig;
use crate::models::record::{ExtractedRecord, ReceiptText};
use rules::{BusinessNameResolver, DateResolver, DateWindow, RuleTable, TotalResolver};

/// Runs the three field resolvers over a receipt.
pub struct ReceiptProcessor {
    business: BusinessNameResolver,
    dates: DateResolver,
    totals: TotalResolver,
}

impl ReceiptProcessor {
    pub fn new(table: &RuleTable, window: DateWindow) -> Self {
        Self {
            business: BusinessNameResolver::new(table),
            dates: DateResolver::new(window),
            totals: TotalResolver::new(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            business: BusinessNameResolver::new(&config.rule_table())
                .with_first_line_fallback(config.first_line_fallback),
            dates: DateResolver::new(config.date_window),
            totals: TotalResolver::new(),
        }
    }

    /// Resolve every field of the receipt.
    pub fn process(&self, receipt: &ReceiptText) -> ExtractedRecord {
        if receipt.is_empty() {
            warn!("Receipt has no text, using default fields");
        }
        let record = ExtractedRecord {
            business_name: self.business.resolve(receipt),
            transaction_date: self.dates.resolve(receipt),
            total: self.totals.resolve(receipt),
        };
        debug!("Extracted record from {} lines: {:?}", receipt.len(), record);
        record
    }
}

impl Default for ReceiptProcessor {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}
