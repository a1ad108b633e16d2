//! # dwellhub-domain
//!
//! Pure domain model for the dwellhub smart-home inventory.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Devices** (switches, dimmers, locks, thermostats)
//! - Define **Hubs** (groups of paired devices)
//! - Define **Dwellings** (homes with installed hubs and an occupancy state)
//! - Maintain the owning-mapping / back-reference pairs between them
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod device;
pub mod dwelling;
pub mod hub;
