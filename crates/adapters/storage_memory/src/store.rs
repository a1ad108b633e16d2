//! The in-memory store shared by all repositories.
//!
//! Aggregates are kept as normalised rows: the device table holds full
//! devices, hub and dwelling rows only hold their back-reference, state and
//! the ordered ids of their members. Reads rebuild the aggregate from rows,
//! so a device updated on its own is seen fresh through its hub.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use dwellhub_domain::device::Device;
use dwellhub_domain::dwelling::{Dwelling, DwellingState};
use dwellhub_domain::error::ValidationError;
use dwellhub_domain::hub::Hub;
use dwellhub_domain::id::{DeviceId, DwellingId, HubId};
use indexmap::{IndexMap, IndexSet};

use crate::error::StorageError;
use crate::ids::{IdGenerator, UuidIds};

/// Shared handle on the tables. Cloning yields another handle on the same
/// data.
#[derive(Clone)]
pub struct Store {
    tables: Rc<RefCell<Tables>>,
    ids: Rc<dyn IdGenerator>,
}

impl Store {
    /// An empty store generating random UUIDs.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id_generator(UuidIds)
    }

    /// An empty store using `ids` to name created aggregates.
    #[must_use]
    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self {
            tables: Rc::new(RefCell::new(Tables::default())),
            ids: Rc::new(ids),
        }
    }

    pub(crate) fn next_id<I>(&self) -> Result<I, ValidationError>
    where
        I: TryFrom<String, Error = ValidationError>,
    {
        I::try_from(self.ids.next_id())
    }

    pub(crate) fn read(&self) -> Result<Ref<'_, Tables>, StorageError> {
        Ok(self.tables.try_borrow()?)
    }

    pub(crate) fn write(&self) -> Result<RefMut<'_, Tables>, StorageError> {
        Ok(self.tables.try_borrow_mut()?)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables.try_borrow();
        let mut debug = f.debug_struct("Store");
        match tables {
            Ok(tables) => debug
                .field("devices", &tables.devices.len())
                .field("hubs", &tables.hubs.len())
                .field("dwellings", &tables.dwellings.len()),
            Err(_) => debug.field("tables", &"<borrowed>"),
        }
        .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) devices: IndexMap<DeviceId, Device>,
    pub(crate) hubs: IndexMap<HubId, HubRow>,
    pub(crate) dwellings: IndexMap<DwellingId, DwellingRow>,
}

#[derive(Debug)]
pub(crate) struct HubRow {
    pub(crate) dwelling: Option<DwellingId>,
    pub(crate) devices: IndexSet<DeviceId>,
}

#[derive(Debug)]
pub(crate) struct DwellingRow {
    pub(crate) state: DwellingState,
    pub(crate) hubs: IndexSet<HubId>,
}

impl Tables {
    pub(crate) fn hub(&self, id: &HubId) -> Option<Hub> {
        self.hubs.get(id).map(|row| self.hydrate_hub(id, row))
    }

    pub(crate) fn hydrate_hub(&self, id: &HubId, row: &HubRow) -> Hub {
        let devices = row.devices.iter().filter_map(|device_id| {
            let device = self.devices.get(device_id).cloned();
            if device.is_none() {
                tracing::warn!(%id, %device_id, "hub references a missing device");
            }
            device
        });
        Hub::from_parts(id.clone(), row.dwelling.clone(), devices)
    }

    pub(crate) fn dwelling(&self, id: &DwellingId) -> Option<Dwelling> {
        self.dwellings
            .get(id)
            .map(|row| self.hydrate_dwelling(id, row))
    }

    pub(crate) fn hydrate_dwelling(&self, id: &DwellingId, row: &DwellingRow) -> Dwelling {
        let hubs = row.hubs.iter().filter_map(|hub_id| {
            let hub = self.hub(hub_id);
            if hub.is_none() {
                tracing::warn!(%id, %hub_id, "dwelling references a missing hub");
            }
            hub
        });
        Dwelling::from_parts(id.clone(), row.state, hubs)
    }

    pub(crate) fn upsert_device(&mut self, device: &Device) -> Result<(), ValidationError> {
        let id = device.require_id()?;
        self.devices.insert(id.clone(), device.clone());
        Ok(())
    }

    /// Write the hub row and cascade into its devices.
    ///
    /// Devices listed in the previous row but missing from `hub` are
    /// released, so no stored device points at a hub that does not list it.
    pub(crate) fn upsert_hub(&mut self, hub: &Hub) -> Result<(), ValidationError> {
        let id = hub.require_id()?;
        for device in hub.devices() {
            self.upsert_device(device)?;
        }
        let row = HubRow {
            dwelling: hub.dwelling().cloned(),
            devices: hub.devices().filter_map(|device| device.id.clone()).collect(),
        };
        if let Some(previous) = self.hubs.insert(id.clone(), row) {
            for device_id in previous.devices.iter().filter(|d| !hub.contains_device(d)) {
                if let Some(device) = self
                    .devices
                    .get_mut(device_id)
                    .filter(|device| device.hub() == Some(id))
                {
                    tracing::debug!(hub = %id, %device_id, "releasing device dropped from hub");
                    device.release_hub();
                }
            }
        }
        Ok(())
    }

    /// Write the dwelling row and cascade into its hubs and their devices.
    pub(crate) fn upsert_dwelling(&mut self, dwelling: &Dwelling) -> Result<(), ValidationError> {
        let id = dwelling.require_id()?;
        for hub in dwelling.hubs() {
            self.upsert_hub(hub)?;
        }
        let row = DwellingRow {
            state: dwelling.state(),
            hubs: dwelling.hubs().filter_map(|hub| hub.id.clone()).collect(),
        };
        if let Some(previous) = self.dwellings.insert(id.clone(), row) {
            for hub_id in previous.hubs.iter().filter(|h| dwelling.hub(h).is_none()) {
                if let Some(row) = self
                    .hubs
                    .get_mut(hub_id)
                    .filter(|row| row.dwelling.as_ref() == Some(id))
                {
                    tracing::debug!(dwelling = %id, %hub_id, "releasing hub dropped from dwelling");
                    row.dwelling = None;
                }
            }
        }
        Ok(())
    }
}
