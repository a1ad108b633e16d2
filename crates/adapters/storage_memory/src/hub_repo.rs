//! In-memory implementation of [`HubRepository`].

use dwellhub_app::ports::HubRepository;
use dwellhub_domain::error::{AlreadyExistsError, ConstraintViolation, DwellHubError};
use dwellhub_domain::hub::Hub;
use dwellhub_domain::id::HubId;

use crate::store::Store;

/// Store-backed hub repository. Saving a hub also saves its devices.
#[derive(Debug, Clone)]
pub struct InMemoryHubRepository {
    store: Store,
}

impl InMemoryHubRepository {
    /// Create a new repository over the given store.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

impl HubRepository for InMemoryHubRepository {
    fn create(&self, mut hub: Hub) -> Result<Hub, DwellHubError> {
        if let Some(id) = &hub.id {
            return Err(AlreadyExistsError {
                entity: "Hub",
                id: id.to_string(),
            }
            .into());
        }

        let id: HubId = self.store.next_id()?;
        hub.id = Some(id.clone());
        hub.validate()?;
        self.store.write()?.upsert_hub(&hub)?;
        tracing::debug!(%id, "hub stored");
        Ok(hub)
    }

    fn get(&self, id: &HubId) -> Result<Hub, DwellHubError> {
        self.store
            .read()?
            .hub(id)
            .ok_or_else(|| DwellHubError::not_found("Hub", id))
    }

    fn list(&self) -> Result<Vec<Hub>, DwellHubError> {
        let tables = self.store.read()?;
        Ok(tables
            .hubs
            .iter()
            .map(|(id, row)| tables.hydrate_hub(id, row))
            .collect())
    }

    fn save(&self, hub: &Hub) -> Result<(), DwellHubError> {
        hub.validate()?;
        for device in hub.devices() {
            device.validate()?;
        }
        self.store.write()?.upsert_hub(hub)?;
        tracing::debug!(id = ?hub.id, devices = hub.devices().len(), "hub saved");
        Ok(())
    }

    fn delete(&self, hub: &Hub) -> Result<(), DwellHubError> {
        let id = hub.require_id()?;
        if let Some(dwelling) = hub.dwelling() {
            return Err(ConstraintViolation::HubInstalled {
                hub: id.to_string(),
                dwelling: dwelling.to_string(),
            }
            .into());
        }
        let count = hub.devices().len();
        if count > 0 {
            return Err(ConstraintViolation::HubHasDevices {
                hub: id.to_string(),
                count,
            }
            .into());
        }

        self.store
            .write()?
            .hubs
            .shift_remove(id)
            .ok_or_else(|| DwellHubError::not_found("Hub", id))?;
        tracing::debug!(%id, "hub deleted");
        Ok(())
    }
}
