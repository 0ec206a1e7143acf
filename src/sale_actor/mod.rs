//! Sale history: immutable receipts of completed checkouts.

pub mod entity;
pub mod error;

pub use error::*;
