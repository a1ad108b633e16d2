//! In-memory implementation of [`DeviceRepository`].

use dwellhub_app::ports::DeviceRepository;
use dwellhub_domain::device::Device;
use dwellhub_domain::error::{AlreadyExistsError, ConstraintViolation, DwellHubError};
use dwellhub_domain::id::DeviceId;

use crate::store::Store;

/// Store-backed device repository.
#[derive(Debug, Clone)]
pub struct InMemoryDeviceRepository {
    store: Store,
}

impl InMemoryDeviceRepository {
    /// Create a new repository over the given store.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

impl DeviceRepository for InMemoryDeviceRepository {
    fn create(&self, mut device: Device) -> Result<Device, DwellHubError> {
        if let Some(id) = &device.id {
            return Err(AlreadyExistsError {
                entity: "Device",
                id: id.to_string(),
            }
            .into());
        }
        device.validate()?;

        let id: DeviceId = self.store.next_id()?;
        device.id = Some(id.clone());
        self.store.write()?.upsert_device(&device)?;
        tracing::debug!(%id, "device stored");
        Ok(device)
    }

    fn get(&self, id: &DeviceId) -> Result<Device, DwellHubError> {
        self.store
            .read()?
            .devices
            .get(id)
            .cloned()
            .ok_or_else(|| DwellHubError::not_found("Device", id))
    }

    fn list(&self) -> Result<Vec<Device>, DwellHubError> {
        Ok(self.store.read()?.devices.values().cloned().collect())
    }

    fn save(&self, device: &Device) -> Result<(), DwellHubError> {
        device.validate()?;
        self.store.write()?.upsert_device(device)?;
        tracing::debug!(id = ?device.id, "device saved");
        Ok(())
    }

    fn delete(&self, device: &Device) -> Result<(), DwellHubError> {
        let id = device.require_id()?;
        if let Some(hub) = device.hub() {
            return Err(ConstraintViolation::DevicePaired {
                device: id.to_string(),
                hub: hub.to_string(),
            }
            .into());
        }

        let mut tables = self.store.write()?;
        let stored = tables
            .devices
            .get(id)
            .ok_or_else(|| DwellHubError::not_found("Device", id))?;
        // The caller's copy may be stale; the stored pairing wins.
        if let Some(hub) = stored.hub() {
            return Err(ConstraintViolation::DevicePaired {
                device: id.to_string(),
                hub: hub.to_string(),
            }
            .into());
        }
        tables.devices.shift_remove(id);
        tracing::debug!(%id, "device deleted");
        Ok(())
    }
}
