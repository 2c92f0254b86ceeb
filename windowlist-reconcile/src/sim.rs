//! A deterministic in-memory render surface.
//!
//! Useful for headless examples and tests: nodes are plain values, measurement is scripted by a
//! closure, and the surface keeps counters for created/removed nodes and the last track height
//! it was asked to apply.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{RenderSurface, SurfaceError};

/// A simulated host node: the markup it was created from plus its applied vertical offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimNode {
    pub markup: String,
    pub offset_top: u64,
}

/// In-memory [`RenderSurface`].
///
/// Measurement is delegated to a closure over the node; returning `None` simulates a node the
/// host cannot measure, which surfaces as an error to the enclosing render pass.
pub struct SimSurface {
    measure: Box<dyn FnMut(&SimNode) -> Option<u32>>,
    track_height: u64,
    created: usize,
    removed: usize,
    offset_log: Vec<u64>,
}

impl SimSurface {
    /// Every node measures at the same fixed height.
    pub fn with_fixed_height(height: u32) -> Self {
        Self::with_measure(move |_| Some(height))
    }

    pub fn with_measure(measure: impl FnMut(&SimNode) -> Option<u32> + 'static) -> Self {
        Self {
            measure: Box::new(measure),
            track_height: 0,
            created: 0,
            removed: 0,
            offset_log: Vec::new(),
        }
    }

    /// The most recently applied track height.
    pub fn track_height(&self) -> u64 {
        self.track_height
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Nodes created and not yet removed.
    pub fn live(&self) -> usize {
        self.created - self.removed
    }

    /// Every offset applied so far, in call order.
    pub fn offset_log(&self) -> &[u64] {
        &self.offset_log
    }
}

impl core::fmt::Debug for SimSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SimSurface")
            .field("track_height", &self.track_height)
            .field("created", &self.created)
            .field("removed", &self.removed)
            .finish_non_exhaustive()
    }
}

impl RenderSurface for SimSurface {
    type Node = SimNode;

    fn create_node(&mut self, markup: &str) -> Result<SimNode, SurfaceError> {
        self.created += 1;
        Ok(SimNode {
            markup: markup.into(),
            offset_top: 0,
        })
    }

    fn measure_height(&mut self, node: &SimNode) -> Result<u32, SurfaceError> {
        (self.measure)(node).ok_or_else(|| SurfaceError::new("layout unavailable for node"))
    }

    fn apply_offset(&mut self, node: &mut SimNode, offset_top: u64) {
        node.offset_top = offset_top;
        self.offset_log.push(offset_top);
    }

    fn remove_node(&mut self, _node: SimNode) {
        self.removed += 1;
    }

    fn set_track_height(&mut self, height: u64) {
        self.track_height = height;
    }
}
