//! Dwelling — a home with installed hubs and an occupancy state.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConstraintViolation, DwellHubError, NotFoundError, ValidationError};
use crate::hub::Hub;
use crate::id::{DwellingId, HubId};

/// Occupancy of a [`Dwelling`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DwellingState {
    #[default]
    Vacant,
    Occupied,
}

impl fmt::Display for DwellingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vacant => f.write_str("vacant"),
            Self::Occupied => f.write_str("occupied"),
        }
    }
}

/// A dwelling owning an insertion-ordered set of installed hubs.
///
/// Invariant: every hub in `hubs` is keyed by its own id and has its
/// `dwelling` back-reference equal to this dwelling's id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dwelling {
    pub id: Option<DwellingId>,
    hubs: IndexMap<HubId, Hub>,
    state: DwellingState,
}

impl Dwelling {
    /// A new, vacant, not yet persisted dwelling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a dwelling from persisted parts.
    #[must_use]
    pub fn from_parts(
        id: DwellingId,
        state: DwellingState,
        hubs: impl IntoIterator<Item = Hub>,
    ) -> Self {
        let hubs = hubs
            .into_iter()
            .filter_map(|hub| hub.id.clone().map(|hub_id| (hub_id, hub)))
            .collect();
        Self {
            id: Some(id),
            hubs,
            state,
        }
    }

    #[must_use]
    pub fn state(&self) -> DwellingState {
        self.state
    }

    pub fn occupy(&mut self) {
        self.state = DwellingState::Occupied;
    }

    pub fn vacate(&mut self) {
        self.state = DwellingState::Vacant;
    }

    /// Installed hubs in installation order.
    #[must_use]
    pub fn hubs(&self) -> impl ExactSizeIterator<Item = &Hub> {
        self.hubs.values()
    }

    #[must_use]
    pub fn hub(&self, id: &HubId) -> Option<&Hub> {
        self.hubs.get(id)
    }

    /// The id, or a validation error for a dwelling that was never persisted.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingId`] when `id` is `None`.
    pub fn require_id(&self) -> Result<&DwellingId, ValidationError> {
        self.id
            .as_ref()
            .ok_or(ValidationError::MissingId { entity: "Dwelling" })
    }

    /// Install `hub` in this dwelling and point its back-reference here.
    ///
    /// Installing a hub that is already here replaces the stored copy.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingId`] if either side has no id, or
    /// [`ConstraintViolation::HubInstalledElsewhere`] if the hub belongs to
    /// another dwelling.
    pub fn install_hub(&mut self, hub: &mut Hub) -> Result<(), DwellHubError> {
        let dwelling_id = self.require_id()?.clone();
        let hub_id = hub.require_id()?.clone();
        if let Some(current) = hub.dwelling().filter(|current| **current != dwelling_id) {
            return Err(ConstraintViolation::HubInstalledElsewhere {
                hub: hub_id.to_string(),
                dwelling: current.to_string(),
            }
            .into());
        }

        hub.set_dwelling(Some(dwelling_id));
        self.hubs.insert(hub_id, hub.clone());
        Ok(())
    }

    /// Remove `hub` from this dwelling and clear its back-reference.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingId`] if the hub has no id, or
    /// [`NotFoundError`] if it is not installed here.
    pub fn uninstall_hub(&mut self, hub: &mut Hub) -> Result<(), DwellHubError> {
        let hub_id = hub.require_id()?;
        if self.hubs.shift_remove(hub_id).is_none() {
            return Err(NotFoundError {
                entity: "Hub",
                id: hub_id.to_string(),
            }
            .into());
        }
        hub.set_dwelling(None);
        Ok(())
    }

    /// Check that every installed hub points back here and is itself
    /// consistent with its devices.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingId`] for an unsaved dwelling and
    /// [`ValidationError::BrokenBackReference`] for a mismatched hub or device.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let dwelling_id = self.require_id()?;
        for (key, hub) in &self.hubs {
            if hub.id.as_ref() != Some(key) || hub.dwelling() != Some(dwelling_id) {
                return Err(ValidationError::BrokenBackReference {
                    owner: "Dwelling",
                    owner_id: dwelling_id.to_string(),
                    member: "Hub",
                    member_id: key.to_string(),
                });
            }
            hub.validate()?;
        }
        Ok(())
    }
}
