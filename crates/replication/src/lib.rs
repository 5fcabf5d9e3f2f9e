//! Replication strategies for the consistent hash ring.
//!
//! This crate decides which nodes hold copies of a key:
//! - How many replicas to place
//! - Which nodes receive them, primary owner first
//! - How to skip nodes that are currently unavailable

pub mod error;
pub mod strategy;

pub use error::ReplicationError;
pub use strategy::{LiveSetStrategy, ReplicationStrategy, SimpleStrategy};
