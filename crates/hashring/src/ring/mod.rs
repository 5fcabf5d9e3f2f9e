//! Consistent hash ring implementation.
//!
//! The ring maps 32-bit points to nodes and answers lookups by binary search
//! over the sorted points, wrapping past the largest point back to the first.

mod builder;
mod lookup;
#[allow(clippy::module_inception)]
mod ring;

pub use builder::RingBuilder;
pub use ring::HashRing;

use std::sync::Arc;

/// Shared handle to an immutable ring snapshot.
///
/// Membership changes on a `Ring` return a new handle and leave the old one
/// valid, so readers can keep using whichever snapshot they hold.
pub type Ring = Arc<HashRing>;
