//! In-memory implementation of [`DwellingRepository`].

use dwellhub_app::ports::DwellingRepository;
use dwellhub_domain::dwelling::Dwelling;
use dwellhub_domain::error::{AlreadyExistsError, ConstraintViolation, DwellHubError};
use dwellhub_domain::id::DwellingId;

use crate::store::Store;

/// Store-backed dwelling repository. Saving cascades into hubs and devices.
#[derive(Debug, Clone)]
pub struct InMemoryDwellingRepository {
    store: Store,
}

impl InMemoryDwellingRepository {
    /// Create a new repository over the given store.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

impl DwellingRepository for InMemoryDwellingRepository {
    fn create(&self, mut dwelling: Dwelling) -> Result<Dwelling, DwellHubError> {
        if let Some(id) = &dwelling.id {
            return Err(AlreadyExistsError {
                entity: "Dwelling",
                id: id.to_string(),
            }
            .into());
        }

        let id: DwellingId = self.store.next_id()?;
        dwelling.id = Some(id.clone());
        dwelling.validate()?;
        self.store.write()?.upsert_dwelling(&dwelling)?;
        tracing::debug!(%id, "dwelling stored");
        Ok(dwelling)
    }

    fn get(&self, id: &DwellingId) -> Result<Dwelling, DwellHubError> {
        self.store
            .read()?
            .dwelling(id)
            .ok_or_else(|| DwellHubError::not_found("Dwelling", id))
    }

    fn list(&self) -> Result<Vec<Dwelling>, DwellHubError> {
        let tables = self.store.read()?;
        Ok(tables
            .dwellings
            .iter()
            .map(|(id, row)| tables.hydrate_dwelling(id, row))
            .collect())
    }

    fn save(&self, dwelling: &Dwelling) -> Result<(), DwellHubError> {
        dwelling.validate()?;
        self.store.write()?.upsert_dwelling(dwelling)?;
        tracing::debug!(id = ?dwelling.id, state = %dwelling.state(), "dwelling saved");
        Ok(())
    }

    fn delete(&self, dwelling: &Dwelling) -> Result<(), DwellHubError> {
        let id = dwelling.require_id()?;
        let count = dwelling.hubs().len();
        if count > 0 {
            return Err(ConstraintViolation::DwellingHasHubs {
                dwelling: id.to_string(),
                count,
            }
            .into());
        }

        self.store
            .write()?
            .dwellings
            .shift_remove(id)
            .ok_or_else(|| DwellHubError::not_found("Dwelling", id))?;
        tracing::debug!(%id, "dwelling deleted");
        Ok(())
    }
}
