//! ComparisonConsumer trait - Presentation-side interface
//!
//! Defines the abstract interface the engine's output flows into.

use crate::{ContractError, DriverComparison};

/// Comparison output trait
///
/// Chart renderers and other presentation layers implement this trait; the
/// engine itself never formats, renders, or prints.
#[trait_variant::make(ComparisonConsumer: Send)]
pub trait LocalComparisonConsumer {
    /// Consumer name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Consume a finished comparison
    ///
    /// # Errors
    /// Returns consumer-side error (should include context)
    async fn consume(&mut self, comparison: &DriverComparison) -> Result<(), ContractError>;
}
