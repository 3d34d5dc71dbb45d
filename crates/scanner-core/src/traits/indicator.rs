//! Indicator trait definitions.

/// Trait for technical indicators that produce a series.
///
/// Indicators process price data and produce derived values
/// useful for scoring decisions.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically closing prices)
    ///
    /// # Returns
    /// A vector of indicator values
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

/// Indicator evaluated at the most recent observation.
///
/// Snapshots never fail: with too little data they return a neutral
/// value documented by each implementation.
pub trait SnapshotIndicator: Send + Sync {
    /// The value reported for the latest observation.
    type Snapshot;

    /// Evaluate the indicator over `data` and report its latest value.
    fn snapshot(&self, data: &[f64]) -> Self::Snapshot;

    /// Get the minimum data points required for a non-neutral snapshot.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Check if there's enough data for a non-neutral snapshot.
    fn has_enough_data(&self, data: &[f64]) -> bool {
        data.len() >= SnapshotIndicator::period(self)
    }
}
