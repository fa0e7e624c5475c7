//! Data models for receipts, extracted records, and configuration.

pub mod config;
pub mod record;

pub use config::{ExtractionConfig, InputConfig, OcrConfig, RcptConfig};
pub use record::{ExtractedRecord, ReceiptText};
