//! Rule-based field resolvers for receipts.

pub mod business;
pub mod dates;
pub mod patterns;
pub mod totals;

pub use business::{BusinessNameResolver, RuleEntry, RuleTable, UNKNOWN_BUSINESS};
pub use dates::{DateResolver, DateWindow};
pub use totals::TotalResolver;

use crate::models::record::ReceiptText;

/// Trait for field resolvers.
///
/// Resolvers are total: when nothing in the receipt matches they return a
/// fixed default instead of signalling absence.
pub trait FieldResolver {
    /// The type of value this resolver produces.
    type Output;

    /// Resolve the field from receipt lines.
    fn resolve(&self, receipt: &ReceiptText) -> Self::Output;
}
