//! System orchestration, startup, and shutdown logic.

pub mod pos_system;
pub mod telemetry;

pub use pos_system::*;
pub use telemetry::*;
