//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod device_service;
pub mod dwelling_service;
pub mod hub_service;

#[cfg(test)]
pub(crate) mod fakes;
