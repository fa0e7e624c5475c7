//! Business name resolution from an ordered rule table.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::FieldResolver;
use crate::models::record::ReceiptText;

/// Name used when no rule matches the receipt.
pub const UNKNOWN_BUSINESS: &str = "unknown biz";

/// A single location-to-business rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    /// Substring (usually a street address) identifying the business.
    pub location_pattern: String,
    /// Canonical business name written into the filename.
    pub canonical_name: String,
}

impl RuleEntry {
    pub fn new(location_pattern: impl Into<String>, canonical_name: impl Into<String>) -> Self {
        Self {
            location_pattern: location_pattern.into(),
            canonical_name: canonical_name.into(),
        }
    }

    fn lowercased(&self) -> Self {
        Self {
            location_pattern: self.location_pattern.to_lowercase(),
            canonical_name: self.canonical_name.to_lowercase(),
        }
    }

    /// Test a lowercased line against this (lowercased) entry.
    ///
    /// A line matches when it starts with the canonical name or contains the
    /// location pattern anywhere. Empty fields never match.
    fn matches(&self, line: &str) -> bool {
        let name_hit = !self.canonical_name.is_empty() && line.starts_with(&self.canonical_name);
        let location_hit = !self.location_pattern.is_empty() && line.contains(&self.location_pattern);
        name_hit || location_hit
    }
}

/// Ordered rule table. Position is precedence: the earliest matching entry wins,
/// so specific patterns must be listed before general ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    entries: Vec<RuleEntry>,
}

impl RuleTable {
    pub fn new(entries: Vec<RuleEntry>) -> Self {
        Self { entries }
    }

    /// The curated table shipped with rcpt.
    pub fn builtin() -> Self {
        let entries = [
            ("2655 el camino real", "costco"),
            ("1000 n rengstorff ave", "costco"),
            ("645 san antonio rd", "safeway"),
            ("1750 miramonte ave", "safeway"),
            ("590 showers dr", "trader joes"),
            ("4800 el camino real", "whole foods"),
            ("555 showers dr", "target"),
            ("2580 w el camino real", "ranch 99"),
            ("800 california st", "walgreens"),
            ("1040 grant rd", "cvs"),
            ("2485 charleston rd", "home depot"),
            // General patterns last.
            ("wholesale", "costco"),
            ("pharmacy", "walgreens"),
        ];

        Self::new(
            entries
                .into_iter()
                .map(|(pattern, name)| RuleEntry::new(pattern, name))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Business name resolver.
pub struct BusinessNameResolver {
    /// Lowercased copy of the rule table.
    rules: Vec<RuleEntry>,
    /// Fall back to the first receipt line when no rule matches.
    first_line_fallback: bool,
}

impl BusinessNameResolver {
    pub fn new(table: &RuleTable) -> Self {
        Self {
            rules: table.iter().map(RuleEntry::lowercased).collect(),
            first_line_fallback: false,
        }
    }

    /// Enable the first-line fallback.
    pub fn with_first_line_fallback(mut self, enabled: bool) -> Self {
        self.first_line_fallback = enabled;
        self
    }

    /// Find the first rule (in table order) matching any line.
    pub fn match_rule(&self, receipt: &ReceiptText) -> Option<&RuleEntry> {
        let lines = receipt.lowercase_lines();
        self.rules
            .iter()
            .find(|rule| lines.iter().any(|line| rule.matches(line)))
    }
}

impl Default for BusinessNameResolver {
    fn default() -> Self {
        Self::new(&RuleTable::builtin())
    }
}

impl FieldResolver for BusinessNameResolver {
    type Output = String;

    fn resolve(&self, receipt: &ReceiptText) -> String {
        if let Some(rule) = self.match_rule(receipt) {
            debug!("Business rule matched: {:?}", rule);
            return rule.canonical_name.clone();
        }

        if self.first_line_fallback {
            let name = first_line_name(receipt);
            debug!("No business rule matched, using first line: {}", name);
            return name;
        }

        UNKNOWN_BUSINESS.to_string()
    }
}

/// Normalize the first receipt line into a filename-safe business name.
fn first_line_name(receipt: &ReceiptText) -> String {
    match receipt.lines().first() {
        Some(line) if !line.trim().is_empty() => line
            .replace(['-', '/', '\\'], " ")
            .replace('\'', "")
            .to_lowercase()
            .trim()
            .to_string(),
        _ => UNKNOWN_BUSINESS.to_string(),
    }
}
