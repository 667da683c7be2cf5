//! Adapter implementations of the task persistence port.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
