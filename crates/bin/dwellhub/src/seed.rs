//! Populate the store from the configured inventory.

use dwellhub_domain::dwelling::DwellingState;
use dwellhub_domain::error::DwellHubError;
use dwellhub_domain::id::HubId;

use crate::config::{HubSeed, Inventory};
use crate::wiring::Services;

/// Counts of what was created.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub devices: usize,
    pub hubs: usize,
    pub dwellings: usize,
}

/// Create every configured device, hub and dwelling through the services,
/// pairing and installing as declared.
///
/// # Errors
///
/// Stops at the first failing operation, e.g. an invalid device attribute.
pub fn seed(inventory: &Inventory, services: &Services) -> Result<Summary, DwellHubError> {
    let mut summary = Summary::default();

    for device in &inventory.devices {
        services
            .devices
            .create_device(device.kind, &device.attributes)?;
        summary.devices += 1;
    }

    for hub in &inventory.hubs {
        seed_hub(hub, services, &mut summary)?;
    }

    for seed in &inventory.dwellings {
        let dwelling = services.dwellings.create_dwelling()?;
        let dwelling_id = dwelling.require_id()?;
        summary.dwellings += 1;

        for hub in &seed.hubs {
            let hub_id = seed_hub(hub, services, &mut summary)?;
            services.dwellings.install_hub(dwelling_id, &hub_id)?;
        }
        if seed.state == DwellingState::Occupied {
            services.dwellings.occupy(dwelling_id)?;
        }
    }

    Ok(summary)
}

fn seed_hub(
    seed: &HubSeed,
    services: &Services,
    summary: &mut Summary,
) -> Result<HubId, DwellHubError> {
    let hub = services.hubs.create_hub()?;
    let hub_id = hub.require_id()?.clone();
    summary.hubs += 1;

    for device in &seed.devices {
        let device = services
            .devices
            .create_device(device.kind, &device.attributes)?;
        summary.devices += 1;
        services.hubs.pair_device(&hub_id, device.require_id()?)?;
    }
    Ok(hub_id)
}
