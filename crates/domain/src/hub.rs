//! Hub — groups paired devices and can be installed in a dwelling.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::error::{ConstraintViolation, DwellHubError, NotFoundError, ValidationError};
use crate::id::{DeviceId, DwellingId, HubId};

/// A hub owning an insertion-ordered set of paired devices.
///
/// Invariant: every device in `devices` is keyed by its own id and has its
/// `hub` back-reference equal to this hub's id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    pub id: Option<HubId>,
    devices: IndexMap<DeviceId, Device>,
    dwelling: Option<DwellingId>,
}

impl Hub {
    /// A new, not yet persisted hub without devices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a hub from persisted parts.
    ///
    /// Repositories use this when loading; no relationship checks are made.
    #[must_use]
    pub fn from_parts(
        id: HubId,
        dwelling: Option<DwellingId>,
        devices: impl IntoIterator<Item = Device>,
    ) -> Self {
        let devices = devices
            .into_iter()
            .filter_map(|device| device.id.clone().map(|device_id| (device_id, device)))
            .collect();
        Self {
            id: Some(id),
            devices,
            dwelling,
        }
    }

    /// Dwelling this hub is installed in, if any.
    #[must_use]
    pub fn dwelling(&self) -> Option<&DwellingId> {
        self.dwelling.as_ref()
    }

    pub(crate) fn set_dwelling(&mut self, dwelling: Option<DwellingId>) {
        self.dwelling = dwelling;
    }

    /// Paired devices in pairing order.
    #[must_use]
    pub fn devices(&self) -> impl ExactSizeIterator<Item = &Device> {
        self.devices.values()
    }

    #[must_use]
    pub fn contains_device(&self, id: &DeviceId) -> bool {
        self.devices.contains_key(id)
    }

    /// The id, or a validation error for a hub that was never persisted.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingId`] when `id` is `None`.
    pub fn require_id(&self) -> Result<&HubId, ValidationError> {
        self.id
            .as_ref()
            .ok_or(ValidationError::MissingId { entity: "Hub" })
    }

    /// Pair `device` to this hub and point its back-reference here.
    ///
    /// Pairing a device that is already in this hub replaces the stored copy.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingId`] if either side has no id, or
    /// [`ConstraintViolation::DevicePairedElsewhere`] if the device belongs to
    /// another hub.
    pub fn pair_device(&mut self, device: &mut Device) -> Result<(), DwellHubError> {
        let hub_id = self.require_id()?.clone();
        let device_id = device.require_id()?.clone();
        if let Some(current) = device.hub().filter(|current| **current != hub_id) {
            return Err(ConstraintViolation::DevicePairedElsewhere {
                device: device_id.to_string(),
                hub: current.to_string(),
            }
            .into());
        }

        device.set_hub(Some(hub_id));
        self.devices.insert(device_id, device.clone());
        Ok(())
    }

    /// Remove `device` from this hub and clear its back-reference.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingId`] if the device has no id, or
    /// [`NotFoundError`] if it is not paired to this hub.
    pub fn unpair_device(&mut self, device: &mut Device) -> Result<(), DwellHubError> {
        let device_id = device.require_id()?;
        if self.devices.shift_remove(device_id).is_none() {
            return Err(NotFoundError {
                entity: "Device",
                id: device_id.to_string(),
            }
            .into());
        }
        device.set_hub(None);
        Ok(())
    }

    /// Check that every paired device points back to this hub.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingId`] for an unsaved hub and
    /// [`ValidationError::BrokenBackReference`] for a mismatched device.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let hub_id = self.require_id()?;
        for (key, device) in &self.devices {
            if device.id.as_ref() != Some(key) || device.hub() != Some(hub_id) {
                return Err(ValidationError::BrokenBackReference {
                    owner: "Hub",
                    owner_id: hub_id.to_string(),
                    member: "Device",
                    member_id: key.to_string(),
                });
            }
        }
        Ok(())
    }
}
