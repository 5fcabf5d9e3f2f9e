//! Consistent hashing with weighted virtual nodes.
//!
//! This crate provides a libketama-style hash ring:
//! - MD5-derived 32-bit ring points (`token`)
//! - Weight-proportional virtual node placement (`vnode`)
//! - Node list and weight table bookkeeping (`node`)
//! - Immutable ring snapshots with lookup, replica walks and
//!   copy-on-write membership changes (`ring`)
//! - A serde-friendly ring description for host configuration (`config`)

pub mod config;
pub mod error;
pub mod node;
pub mod ring;
pub mod token;
pub mod vnode;

pub use config::RingConfig;
pub use error::{Error, Result};
pub use node::{Membership, Weight, DEFAULT_WEIGHT};
pub use ring::{HashRing, Ring, RingBuilder};
pub use token::HashKey;
