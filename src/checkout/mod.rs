//! The till: one in-progress cart and its path to a recorded sale.

pub mod error;
pub mod session;

pub use error::*;
pub use session::*;
