//! Service construction over a single shared store.

use dwellhub_adapter_storage_memory::{
    InMemoryDeviceRepository, InMemoryDwellingRepository, InMemoryHubRepository, SequentialIds,
    Store,
};
use dwellhub_app::services::device_service::DeviceService;
use dwellhub_app::services::dwelling_service::DwellingService;
use dwellhub_app::services::hub_service::HubService;

use crate::config::{IdStrategy, IdsConfig};

pub type Devices = DeviceService<InMemoryDeviceRepository>;
pub type Hubs = HubService<InMemoryHubRepository, InMemoryDeviceRepository>;
pub type Dwellings = DwellingService<InMemoryDwellingRepository, InMemoryHubRepository>;

/// The three application services, all backed by the same store.
pub struct Services {
    pub devices: Devices,
    pub hubs: Hubs,
    pub dwellings: Dwellings,
}

impl Services {
    #[must_use]
    pub fn new(store: &Store) -> Self {
        let devices = InMemoryDeviceRepository::new(store.clone());
        let hubs = InMemoryHubRepository::new(store.clone());
        let dwellings = InMemoryDwellingRepository::new(store.clone());

        Self {
            devices: DeviceService::new(devices.clone()),
            hubs: HubService::new(hubs.clone(), devices),
            dwellings: DwellingService::new(dwellings, hubs),
        }
    }
}

/// Build an empty store naming aggregates as configured.
#[must_use]
pub fn store(ids: &IdsConfig) -> Store {
    match ids.strategy {
        IdStrategy::Uuid => Store::new(),
        IdStrategy::Sequential => Store::with_id_generator(SequentialIds::new(ids.prefix.as_str())),
    }
}
