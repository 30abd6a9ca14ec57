//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! - **`normalize`**: Converts a [`Document`](crate::models::Document) into a
//!   stable `TrackSnap` outline for `insta` snapshots
//! - **`invariants`**: Panics when the track tree breaks its shape rules
//!   (depth, dense subtrack ids, parent links)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{TrackSnap, normalize};
