//! Team registry bounded context.
//!
//! Owns team creation (optionally with an initial member batch), uniqueness
//! enforcement for team names and member emails, member addition, and the
//! hydrated team/member response views. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;
pub mod views;

#[cfg(test)]
mod tests;
