//! Storage port — repository traits for persistence.
//!
//! One repository per aggregate root. Implementations assign ids on
//! `create`, and `save` on a container cascades into its members so the
//! store stays consistent after a local relationship change.

use dwellhub_domain::device::Device;
use dwellhub_domain::dwelling::Dwelling;
use dwellhub_domain::error::DwellHubError;
use dwellhub_domain::hub::Hub;
use dwellhub_domain::id::{DeviceId, DwellingId, HubId};

/// Repository for [`Device`]s.
pub trait DeviceRepository {
    /// Assign a fresh id to an unsaved device and store it.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` when the device already carries an id, or a
    /// validation or storage error.
    fn create(&self, device: Device) -> Result<Device, DwellHubError>;

    /// Fetch a device.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no device has this id.
    fn get(&self, id: &DeviceId) -> Result<Device, DwellHubError>;

    /// All devices in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend cannot be read.
    fn list(&self) -> Result<Vec<Device>, DwellHubError>;

    /// Upsert a device by id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unsaved or invalid device.
    fn save(&self, device: &Device) -> Result<(), DwellHubError>;

    /// Remove a device that is not paired to any hub.
    ///
    /// # Errors
    ///
    /// Returns `Constraint` while the device is paired, or `NotFound`.
    fn delete(&self, device: &Device) -> Result<(), DwellHubError>;
}

/// Repository for [`Hub`]s.
pub trait HubRepository {
    /// Assign a fresh id to an unsaved hub and store it.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` when the hub already carries an id.
    fn create(&self, hub: Hub) -> Result<Hub, DwellHubError>;

    /// Fetch a hub with its current devices.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no hub has this id.
    fn get(&self, id: &HubId) -> Result<Hub, DwellHubError>;

    /// All hubs in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend cannot be read.
    fn list(&self) -> Result<Vec<Hub>, DwellHubError>;

    /// Upsert a hub and every device it owns.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unsaved hub or a broken
    /// back-reference.
    fn save(&self, hub: &Hub) -> Result<(), DwellHubError>;

    /// Remove a hub that has no devices and is not installed anywhere.
    ///
    /// # Errors
    ///
    /// Returns `Constraint` while the hub has relationships, or `NotFound`.
    fn delete(&self, hub: &Hub) -> Result<(), DwellHubError>;
}

/// Repository for [`Dwelling`]s.
pub trait DwellingRepository {
    /// Assign a fresh id to an unsaved dwelling and store it.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` when the dwelling already carries an id.
    fn create(&self, dwelling: Dwelling) -> Result<Dwelling, DwellHubError>;

    /// Fetch a dwelling with its current hubs.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no dwelling has this id.
    fn get(&self, id: &DwellingId) -> Result<Dwelling, DwellHubError>;

    /// All dwellings in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend cannot be read.
    fn list(&self) -> Result<Vec<Dwelling>, DwellHubError>;

    /// Upsert a dwelling, its hubs and their devices.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unsaved dwelling or a broken
    /// back-reference.
    fn save(&self, dwelling: &Dwelling) -> Result<(), DwellHubError>;

    /// Remove a dwelling without installed hubs.
    ///
    /// # Errors
    ///
    /// Returns `Constraint` while hubs are installed, or `NotFound`.
    fn delete(&self, dwelling: &Dwelling) -> Result<(), DwellHubError>;
}

impl<T: DeviceRepository + ?Sized> DeviceRepository for &T {
    fn create(&self, device: Device) -> Result<Device, DwellHubError> {
        (**self).create(device)
    }

    fn get(&self, id: &DeviceId) -> Result<Device, DwellHubError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<Device>, DwellHubError> {
        (**self).list()
    }

    fn save(&self, device: &Device) -> Result<(), DwellHubError> {
        (**self).save(device)
    }

    fn delete(&self, device: &Device) -> Result<(), DwellHubError> {
        (**self).delete(device)
    }
}

impl<T: HubRepository + ?Sized> HubRepository for &T {
    fn create(&self, hub: Hub) -> Result<Hub, DwellHubError> {
        (**self).create(hub)
    }

    fn get(&self, id: &HubId) -> Result<Hub, DwellHubError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<Hub>, DwellHubError> {
        (**self).list()
    }

    fn save(&self, hub: &Hub) -> Result<(), DwellHubError> {
        (**self).save(hub)
    }

    fn delete(&self, hub: &Hub) -> Result<(), DwellHubError> {
        (**self).delete(hub)
    }
}

impl<T: DwellingRepository + ?Sized> DwellingRepository for &T {
    fn create(&self, dwelling: Dwelling) -> Result<Dwelling, DwellHubError> {
        (**self).create(dwelling)
    }

    fn get(&self, id: &DwellingId) -> Result<Dwelling, DwellHubError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<Dwelling>, DwellHubError> {
        (**self).list()
    }

    fn save(&self, dwelling: &Dwelling) -> Result<(), DwellHubError> {
        (**self).save(dwelling)
    }

    fn delete(&self, dwelling: &Dwelling) -> Result<(), DwellHubError> {
        (**self).delete(dwelling)
    }
}
