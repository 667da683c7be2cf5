//! Adapter implementations of the team persistence ports.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
