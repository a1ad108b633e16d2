//! Hub service — pairing devices to hubs.

use dwellhub_domain::device::Device;
use dwellhub_domain::error::DwellHubError;
use dwellhub_domain::hub::Hub;
use dwellhub_domain::id::{DeviceId, HubId};

use crate::ports::{DeviceRepository, HubRepository};

/// Application service for hubs and their device pairings.
pub struct HubService<H, D> {
    hubs: H,
    devices: D,
}

impl<H: HubRepository, D: DeviceRepository> HubService<H, D> {
    /// Create a new service backed by the given repositories.
    #[must_use]
    pub fn new(hubs: H, devices: D) -> Self {
        Self { hubs, devices }
    }

    /// Register a new, empty hub.
    ///
    /// # Errors
    ///
    /// Returns an error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub fn create_hub(&self) -> Result<Hub, DwellHubError> {
        self.hubs.create(Hub::new())
    }

    /// Look up a hub by id.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when no hub with `id` exists.
    #[tracing::instrument(skip(self))]
    pub fn get_hub(&self, id: &HubId) -> Result<Hub, DwellHubError> {
        self.hubs.get(id)
    }

    /// List all hubs in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error propagated from the repository.
    pub fn list_hubs(&self) -> Result<Vec<Hub>, DwellHubError> {
        self.hubs.list()
    }

    /// Devices paired to a hub, in pairing order.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when no hub with `id` exists.
    #[tracing::instrument(skip(self))]
    pub fn list_hub_devices(&self, id: &HubId) -> Result<Vec<Device>, DwellHubError> {
        Ok(self.get_hub(id)?.devices().cloned().collect())
    }

    /// Pair a device to a hub and persist the hub with its devices.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when either side does not exist,
    /// or [`DwellHubError::Constraint`] when the device is paired elsewhere.
    #[tracing::instrument(skip(self))]
    pub fn pair_device(&self, hub_id: &HubId, device_id: &DeviceId) -> Result<(), DwellHubError> {
        let mut hub = self.hubs.get(hub_id)?;
        let mut device = self.devices.get(device_id)?;
        hub.pair_device(&mut device)?;
        self.hubs.save(&hub)?;
        tracing::info!(%hub_id, %device_id, "device paired");
        Ok(())
    }

    /// Unpair a device from a hub and persist both.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when either side does not exist or
    /// the device is not paired to this hub.
    #[tracing::instrument(skip(self))]
    pub fn unpair_device(
        &self,
        hub_id: &HubId,
        device_id: &DeviceId,
    ) -> Result<(), DwellHubError> {
        let mut hub = self.hubs.get(hub_id)?;
        let mut device = self.devices.get(device_id)?;
        hub.unpair_device(&mut device)?;
        self.hubs.save(&hub)?;
        self.devices.save(&device)?;
        tracing::info!(%hub_id, %device_id, "device unpaired");
        Ok(())
    }

    /// Delete a hub that has no devices and is not installed in a dwelling.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the hub does not exist, or
    /// [`DwellHubError::Constraint`] while it still has relationships.
    #[tracing::instrument(skip(self))]
    pub fn delete_hub(&self, id: &HubId) -> Result<(), DwellHubError> {
        let hub = self.get_hub(id)?;
        self.hubs.delete(&hub)
    }
}
