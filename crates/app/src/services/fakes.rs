//! In-memory fakes of the storage ports for service tests.

use std::cell::{Cell, RefCell};

use dwellhub_domain::device::Device;
use dwellhub_domain::dwelling::Dwelling;
use dwellhub_domain::error::{AlreadyExistsError, ConstraintViolation, DwellHubError};
use dwellhub_domain::hub::Hub;
use dwellhub_domain::id::{DeviceId, DwellingId, HubId};
use indexmap::IndexMap;

use crate::ports::{DeviceRepository, DwellingRepository, HubRepository};

/// One fake backing all three repositories, so cascades are visible
/// across them. Ids are `fake-1`, `fake-2`, …
#[derive(Default)]
pub(crate) struct FakeStore {
    counter: Cell<u64>,
    devices: RefCell<IndexMap<DeviceId, Device>>,
    hubs: RefCell<IndexMap<HubId, Hub>>,
    dwellings: RefCell<IndexMap<DwellingId, Dwelling>>,
}

impl FakeStore {
    fn next_id(&self) -> String {
        let next = self.counter.get() + 1;
        self.counter.set(next);
        format!("fake-{next}")
    }

    pub(crate) fn device_count(&self) -> usize {
        self.devices.borrow().len()
    }
}

impl DeviceRepository for FakeStore {
    fn create(&self, mut device: Device) -> Result<Device, DwellHubError> {
        if let Some(id) = &device.id {
            return Err(AlreadyExistsError {
                entity: "Device",
                id: id.to_string(),
            }
            .into());
        }
        let id = DeviceId::new(self.next_id())?;
        device.id = Some(id.clone());
        self.devices.borrow_mut().insert(id, device.clone());
        Ok(device)
    }

    fn get(&self, id: &DeviceId) -> Result<Device, DwellHubError> {
        self.devices
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| DwellHubError::not_found("Device", id))
    }

    fn list(&self) -> Result<Vec<Device>, DwellHubError> {
        Ok(self.devices.borrow().values().cloned().collect())
    }

    fn save(&self, device: &Device) -> Result<(), DwellHubError> {
        let id = device.require_id()?.clone();
        self.devices.borrow_mut().insert(id, device.clone());
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
        self.devices
            .borrow_mut()
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| DwellHubError::not_found("Device", id))
    }
}

impl HubRepository for FakeStore {
    fn create(&self, mut hub: Hub) -> Result<Hub, DwellHubError> {
        let id = HubId::new(self.next_id())?;
        hub.id = Some(id.clone());
        self.hubs.borrow_mut().insert(id, hub.clone());
        Ok(hub)
    }

    fn get(&self, id: &HubId) -> Result<Hub, DwellHubError> {
        let hub = self
            .hubs
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| DwellHubError::not_found("Hub", id))?;
        // Refresh device snapshots the way a normalised store would.
        let devices = self.devices.borrow();
        let refreshed = hub
            .devices()
            .filter_map(|device| device.id.as_ref().and_then(|id| devices.get(id)).cloned())
            .collect::<Vec<_>>();
        Ok(Hub::from_parts(id.clone(), hub.dwelling().cloned(), refreshed))
    }

    fn list(&self) -> Result<Vec<Hub>, DwellHubError> {
        Ok(self.hubs.borrow().values().cloned().collect())
    }

    fn save(&self, hub: &Hub) -> Result<(), DwellHubError> {
        hub.validate()?;
        for device in hub.devices() {
            DeviceRepository::save(self, device)?;
        }
        self.hubs
            .borrow_mut()
            .insert(hub.require_id()?.clone(), hub.clone());
        Ok(())
    }

    fn delete(&self, hub: &Hub) -> Result<(), DwellHubError> {
        let id = hub.require_id()?;
        self.hubs
            .borrow_mut()
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| DwellHubError::not_found("Hub", id))
    }
}

impl DwellingRepository for FakeStore {
    fn create(&self, mut dwelling: Dwelling) -> Result<Dwelling, DwellHubError> {
        let id = DwellingId::new(self.next_id())?;
        dwelling.id = Some(id.clone());
        self.dwellings.borrow_mut().insert(id, dwelling.clone());
        Ok(dwelling)
    }

    fn get(&self, id: &DwellingId) -> Result<Dwelling, DwellHubError> {
        self.dwellings
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| DwellHubError::not_found("Dwelling", id))
    }

    fn list(&self) -> Result<Vec<Dwelling>, DwellHubError> {
        Ok(self.dwellings.borrow().values().cloned().collect())
    }

    fn save(&self, dwelling: &Dwelling) -> Result<(), DwellHubError> {
        dwelling.validate()?;
        for hub in dwelling.hubs() {
            HubRepository::save(self, hub)?;
        }
        self.dwellings
            .borrow_mut()
            .insert(dwelling.require_id()?.clone(), dwelling.clone());
        Ok(())
    }

    fn delete(&self, dwelling: &Dwelling) -> Result<(), DwellHubError> {
        let id = dwelling.require_id()?;
        self.dwellings
            .borrow_mut()
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| DwellHubError::not_found("Dwelling", id))
    }
}
