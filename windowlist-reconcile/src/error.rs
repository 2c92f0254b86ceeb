use alloc::string::String;

/// An opaque failure reported by a [`crate::RenderSurface`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct SurfaceError {
    reason: String,
}

impl SurfaceError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Failures surfaced by a render or reconciliation pass.
///
/// All operations are local and deterministic given current state, so none of these are
/// transient; there is no retry policy. A failed pass leaves the materialized node list in its
/// previous state (nodes created during the pass are removed before the error propagates).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The surface failed to instantiate a node from markup.
    #[error("node for index {index} could not be created: {source}")]
    Create { index: usize, source: SurfaceError },

    /// The surface could not produce a height for a node. The windowing pass cannot proceed
    /// without one, since every later offset depends on it.
    #[error("node for index {index} could not be measured: {source}")]
    Unmeasurable { index: usize, source: SurfaceError },
}
