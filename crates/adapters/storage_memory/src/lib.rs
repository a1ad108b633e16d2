//! # dwellhub-adapter-storage-memory
//!
//! In-memory persistence adapter.
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `dwellhub-app::ports::storage`
//! - Own the session-scoped [`Store`]: one table per aggregate root
//! - Generate identifiers on `create` through a pluggable [`IdGenerator`]
//! - Map between domain aggregates and stored rows, cascading saves from
//!   dwellings to hubs to devices
//!
//! ## Dependency rule
//! Depends on `dwellhub-app` (for port traits) and `dwellhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod device_repo;
mod dwelling_repo;
mod error;
mod hub_repo;
mod ids;
mod store;

pub use device_repo::InMemoryDeviceRepository;
pub use dwelling_repo::InMemoryDwellingRepository;
pub use error::StorageError;
pub use hub_repo::InMemoryHubRepository;
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use store::Store;
