//! Dwelling service — installing hubs and tracking occupancy.

use dwellhub_domain::dwelling::Dwelling;
use dwellhub_domain::error::DwellHubError;
use dwellhub_domain::hub::Hub;
use dwellhub_domain::id::{DwellingId, HubId};

use crate::ports::{DwellingRepository, HubRepository};

/// Application service for dwellings.
pub struct DwellingService<W, H> {
    dwellings: W,
    hubs: H,
}

impl<W: DwellingRepository, H: HubRepository> DwellingService<W, H> {
    /// Create a new service backed by the given repositories.
    #[must_use]
    pub fn new(dwellings: W, hubs: H) -> Self {
        Self { dwellings, hubs }
    }

    /// Register a new, vacant dwelling.
    ///
    /// # Errors
    ///
    /// Returns an error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub fn create_dwelling(&self) -> Result<Dwelling, DwellHubError> {
        self.dwellings.create(Dwelling::new())
    }

    /// Look up a dwelling by id.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when no dwelling with `id` exists.
    #[tracing::instrument(skip(self))]
    pub fn get_dwelling(&self, id: &DwellingId) -> Result<Dwelling, DwellHubError> {
        self.dwellings.get(id)
    }

    /// List all dwellings in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error propagated from the repository.
    pub fn list_dwellings(&self) -> Result<Vec<Dwelling>, DwellHubError> {
        self.dwellings.list()
    }

    /// Hubs installed in a dwelling, in installation order.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when no dwelling with `id` exists.
    #[tracing::instrument(skip(self))]
    pub fn list_dwelling_hubs(&self, id: &DwellingId) -> Result<Vec<Hub>, DwellHubError> {
        Ok(self.dwellings.get(id)?.hubs().cloned().collect())
    }

    /// Install a hub in a dwelling and persist the dwelling with its hubs.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when either side does not exist,
    /// or [`DwellHubError::Constraint`] when the hub is installed elsewhere.
    #[tracing::instrument(skip(self))]
    pub fn install_hub(
        &self,
        dwelling_id: &DwellingId,
        hub_id: &HubId,
    ) -> Result<(), DwellHubError> {
        let mut dwelling = self.dwellings.get(dwelling_id)?;
        let mut hub = self.hubs.get(hub_id)?;
        dwelling.install_hub(&mut hub)?;
        self.dwellings.save(&dwelling)?;
        tracing::info!(%dwelling_id, %hub_id, "hub installed");
        Ok(())
    }

    /// Remove a hub from a dwelling and persist both.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when either side does not exist or
    /// the hub is not installed in this dwelling.
    #[tracing::instrument(skip(self))]
    pub fn uninstall_hub(
        &self,
        dwelling_id: &DwellingId,
        hub_id: &HubId,
    ) -> Result<(), DwellHubError> {
        let mut dwelling = self.dwellings.get(dwelling_id)?;
        let mut hub = self.hubs.get(hub_id)?;
        dwelling.uninstall_hub(&mut hub)?;
        self.dwellings.save(&dwelling)?;
        self.hubs.save(&hub)?;
        tracing::info!(%dwelling_id, %hub_id, "hub uninstalled");
        Ok(())
    }

    /// Mark a dwelling as occupied.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when no dwelling with `id` exists.
    #[tracing::instrument(skip(self))]
    pub fn occupy(&self, id: &DwellingId) -> Result<(), DwellHubError> {
        let mut dwelling = self.dwellings.get(id)?;
        dwelling.occupy();
        self.dwellings.save(&dwelling)
    }

    /// Mark a dwelling as vacant.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when no dwelling with `id` exists.
    #[tracing::instrument(skip(self))]
    pub fn vacate(&self, id: &DwellingId) -> Result<(), DwellHubError> {
        let mut dwelling = self.dwellings.get(id)?;
        dwelling.vacate();
        self.dwellings.save(&dwelling)
    }

    /// Delete a dwelling without installed hubs.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the dwelling does not exist,
    /// or [`DwellHubError::Constraint`] while hubs are installed.
    #[tracing::instrument(skip(self))]
    pub fn delete_dwelling(&self, id: &DwellingId) -> Result<(), DwellHubError> {
        let dwelling = self.dwellings.get(id)?;
        self.dwellings.delete(&dwelling)
    }
}
