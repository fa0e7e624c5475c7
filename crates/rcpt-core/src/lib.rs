//! Core library for receipt filename synthesis.
//!
//! This crate provides:
//! - Text extraction from receipts (plain text, PDF, OCR on images)
//! - Rule-based field resolution (business name, transaction date, total)
//! - Canonical filename synthesis (`YYYY-MM-DD-<name>-$<total>`)
//! - Field-level accuracy scoring against reference filenames

pub mod error;
pub mod models;
pub mod receipt;
pub mod scoring;
pub mod text;

pub use error::{RcptError, Result};
pub use models::config::RcptConfig;
pub use models::record::{ExtractedRecord, ReceiptText};
pub use receipt::{FieldResolver, ReceiptProcessor};
pub use receipt::rules::{BusinessNameResolver, DateResolver, DateWindow, RuleEntry, RuleTable, TotalResolver};
pub use scoring::{compare_filenames, AggregateSummary, ComparisonResult};
pub use text::{DocumentTextExtractor, TextExtractor};
