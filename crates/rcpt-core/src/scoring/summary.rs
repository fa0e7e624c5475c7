//! Batch accuracy aggregation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::compare::ComparisonResult;
use crate::error::ScoreError;

/// Field-level accuracy over a batch of comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSummary {
    /// Number of comparisons. Never zero.
    pub count: usize,
    pub date_equal: usize,
    pub name_equal: usize,
    pub price_equal: usize,
}

impl AggregateSummary {
    /// Reduce comparison results. An empty batch has no defined percentages
    /// and is reported as [`ScoreError::EmptyBatch`].
    pub fn from_results(results: &[ComparisonResult]) -> Result<Self, ScoreError> {
        if results.is_empty() {
            return Err(ScoreError::EmptyBatch);
        }

        Ok(Self {
            count: results.len(),
            date_equal: results.iter().filter(|r| r.date_equal).count(),
            name_equal: results.iter().filter(|r| r.name_equal).count(),
            price_equal: results.iter().filter(|r| r.price_equal).count(),
        })
    }

    pub fn date_pct(&self) -> f64 {
        self.pct(self.date_equal)
    }

    pub fn name_pct(&self) -> f64 {
        self.pct(self.name_equal)
    }

    pub fn price_pct(&self) -> f64 {
        self.pct(self.price_equal)
    }

    fn pct(&self, equal: usize) -> f64 {
        equal as f64 * 100.0 / self.count as f64
    }
}

impl fmt::Display for AggregateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "date: {}/{}: {:.1} %", self.date_equal, self.count, self.date_pct())?;
        writeln!(f, "name: {}/{}: {:.1} %", self.name_equal, self.count, self.name_pct())?;
        write!(f, "price: {}/{}: {:.1} %", self.price_equal, self.count, self.price_pct())
    }
}
