use thiserror::Error;

/// Errors reported by chart operations that cannot be clamped or defaulted.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The measured size was negative or not finite.
    #[error("invalid chart size {width}x{height}")]
    InvalidSize {
        /// Offending width.
        width: f32,
        /// Offending height.
        height: f32,
    },
    /// `draw` was called before the first `measure`.
    #[error("chart has not been measured yet")]
    NotMeasured,
    /// The chart was destroyed and no longer talks to its host.
    #[error("chart has been destroyed")]
    Destroyed,
    /// A configuration snapshot could not be parsed.
    #[cfg(feature = "serde")]
    #[error("failed to parse chart configuration: {0}")]
    Config(#[from] serde_json::Error),
}
