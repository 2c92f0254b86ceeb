//! Headless windowing math for virtualized lists.
//!
//! For the reconciliation engine and the windowing controller that drive a render surface, see
//! the `windowlist-reconcile` crate.
//!
//! This crate owns the bookkeeping a virtualized list needs when item heights are unknown until
//! first render: estimate-then-measure heights per index, prefix-sum offsets, total track
//! height, and overscanned window ranges for a scroll position.
//!
//! It is UI-agnostic. A rendering layer is expected to provide:
//! - the scroll container's measured height
//! - scroll offsets
//! - real item heights, measured after nodes are first rendered
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod fenwick;
mod metadata;
mod shallow;
mod types;


pub use metadata::MetadataStore;
pub use shallow::{ShallowEq, shallow_eq_opt};
pub use types::{WindowItem, WindowRange};
