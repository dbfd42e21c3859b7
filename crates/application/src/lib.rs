//! Application layer - Use cases and orchestration
//!
//! Contains the place, region and check-in use cases, the proximity search
//! orchestrator, and the port definitions they depend on.

pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod testing;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
