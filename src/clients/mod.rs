//! Typed handles over the resource actors.
//!
//! Each client wraps a [`ResourceClient`](crate::actor_framework::ResourceClient),
//! converts framework errors into the service's own error type, and
//! instruments every call.

#[macro_use]
mod macros;
pub mod product_client;
pub mod sale_client;

pub use product_client::*;
pub use sale_client::*;
