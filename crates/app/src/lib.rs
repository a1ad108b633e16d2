//! # dwellhub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceRepository` — create/get/list/save/delete for devices
//!   - `HubRepository` — same for hubs, `save` cascades into devices
//!   - `DwellingRepository` — same for dwellings, `save` cascades into hubs
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DeviceService` — create, update, describe, list, delete devices
//!   - `HubService` — pair and unpair devices, list a hub's devices
//!   - `DwellingService` — install hubs, occupy and vacate dwellings
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `dwellhub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
