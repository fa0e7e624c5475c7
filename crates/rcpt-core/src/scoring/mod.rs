//! Field-level accuracy scoring of synthesized filenames.

mod compare;
mod summary;

pub use compare::{compare_filenames, ComparisonResult, FilenameParts};
pub use summary::AggregateSummary;
