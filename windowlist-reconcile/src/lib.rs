//! Incremental reconciliation and the windowing controller for the `windowlist` crate.
//!
//! The `windowlist` crate owns the math (heights, offsets, window ranges); this crate drives a
//! host surface with it:
//!
//! - [`Reconciler`] positionally diffs an item array against materialized nodes, invoking
//!   create/patch callbacks only for slots that actually changed.
//! - [`VirtualList`] owns the dataset and metadata, turns scroll positions into overscanned
//!   windows, and feeds the reconciler one frame at a time.
//! - [`RenderSurface`] is the host boundary: node creation from opaque markup, height
//!   measurement, absolute positioning, and track sizing.
//!
//! No UI framework is bound here; [`sim::SimSurface`] provides a deterministic in-memory
//! surface for tests and headless runs.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod error;
mod frame;
mod reconciler;
pub mod sim;
mod surface;

#[cfg(test)]
mod tests;

pub use controller::{
    DEFAULT_BOOTSTRAP_LEN, DEFAULT_ESTIMATE_HEIGHT, DEFAULT_OVERSCAN, VirtualList,
    VirtualListOptions,
};
pub use error::{RenderError, SurfaceError};
pub use frame::{FrameGate, Throttle};
pub use reconciler::{Reconciler, SlotOps};
pub use surface::RenderSurface;
