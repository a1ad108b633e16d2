//! Device — a switch, dimmer, lock or thermostat that can be paired to a hub.

mod state;
mod update;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use state::{DeviceVariant, LockState, SwitchState};
pub use update::DeviceUpdate;

use crate::error::ValidationError;
use crate::id::{DeviceId, HubId};

/// Loosely typed attribute map used to create or update a device by name.
pub type Attributes = serde_json::Map<String, Value>;

/// Highest accepted dimmer brightness.
pub const MAX_BRIGHTNESS: u8 = 100;

/// Variant-specific payload of a [`Device`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeviceKind {
    Switch {
        state: SwitchState,
    },
    Dimmer {
        brightness: u8,
    },
    Lock {
        state: LockState,
        #[serde(default)]
        code: Vec<String>,
    },
    Thermostat {
        target_temp_f: f64,
        actual_temp_f: f64,
    },
}

impl DeviceKind {
    /// The tag of this variant.
    #[must_use]
    pub fn variant(&self) -> DeviceVariant {
        match self {
            Self::Switch { .. } => DeviceVariant::Switch,
            Self::Dimmer { .. } => DeviceVariant::Dimmer,
            Self::Lock { .. } => DeviceVariant::Lock,
            Self::Thermostat { .. } => DeviceVariant::Thermostat,
        }
    }

    /// Build a variant payload from named attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownField`] for an attribute the variant
    /// does not have, [`ValidationError::InvalidAttributes`] when a value has
    /// the wrong type or a required attribute is missing, and
    /// [`ValidationError::BrightnessOutOfRange`] for a dimmer above 100.
    pub fn from_attributes(
        variant: DeviceVariant,
        attributes: &Attributes,
    ) -> Result<Self, ValidationError> {
        let kind: Self = update::tagged_from_attributes(variant, attributes)?;
        kind.validate()?;
        Ok(kind)
    }

    /// Check variant-level invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BrightnessOutOfRange`] for a dimmer above 100.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Dimmer { brightness } if *brightness > MAX_BRIGHTNESS => {
                Err(ValidationError::BrightnessOutOfRange(*brightness))
            }
            _ => Ok(()),
        }
    }
}

/// A smart-home device.
///
/// `hub` is a non-owning back-reference to the [`Hub`](crate::hub::Hub)
/// the device is paired to. It changes through
/// [`Hub::pair_device`](crate::hub::Hub::pair_device),
/// [`Hub::unpair_device`](crate::hub::Hub::unpair_device) and
/// [`Device::release_hub`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: Option<DeviceId>,
    hub: Option<HubId>,
    pub kind: DeviceKind,
}

impl Device {
    /// A new, not yet persisted device.
    #[must_use]
    pub fn new(kind: DeviceKind) -> Self {
        Self {
            id: None,
            hub: None,
            kind,
        }
    }

    #[must_use]
    pub fn switch(state: SwitchState) -> Self {
        Self::new(DeviceKind::Switch { state })
    }

    #[must_use]
    pub fn dimmer(brightness: u8) -> Self {
        Self::new(DeviceKind::Dimmer { brightness })
    }

    #[must_use]
    pub fn lock<S: Into<String>>(state: LockState, code: impl IntoIterator<Item = S>) -> Self {
        Self::new(DeviceKind::Lock {
            state,
            code: code.into_iter().map(Into::into).collect(),
        })
    }

    #[must_use]
    pub fn thermostat(target_temp_f: f64, actual_temp_f: f64) -> Self {
        Self::new(DeviceKind::Thermostat {
            target_temp_f,
            actual_temp_f,
        })
    }

    /// Hub this device is paired to, if any.
    #[must_use]
    pub fn hub(&self) -> Option<&HubId> {
        self.hub.as_ref()
    }

    pub(crate) fn set_hub(&mut self, hub: Option<HubId>) {
        self.hub = hub;
    }

    /// Clear the hub back-reference.
    ///
    /// Storage calls this when a saved hub no longer lists the device.
    pub fn release_hub(&mut self) {
        self.hub = None;
    }

    #[must_use]
    pub fn variant(&self) -> DeviceVariant {
        self.kind.variant()
    }

    /// The id, or a validation error for a device that was never persisted.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingId`] when `id` is `None`.
    pub fn require_id(&self) -> Result<&DeviceId, ValidationError> {
        self.id
            .as_ref()
            .ok_or(ValidationError::MissingId { entity: "Device" })
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// See [`DeviceKind::validate`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.kind.validate()
    }

    /// Apply a partial update of the same variant.
    ///
    /// The device is left untouched when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::VariantMismatch`] when `update` targets a
    /// different variant, or [`ValidationError::BrightnessOutOfRange`].
    pub fn apply(&mut self, update: DeviceUpdate) -> Result<(), ValidationError> {
        update.validate()?;
        match (&mut self.kind, update) {
            (DeviceKind::Switch { state }, DeviceUpdate::Switch { state: new_state }) => {
                if let Some(new_state) = new_state {
                    *state = new_state;
                }
            }
            (
                DeviceKind::Dimmer { brightness },
                DeviceUpdate::Dimmer {
                    brightness: new_brightness,
                },
            ) => {
                if let Some(new_brightness) = new_brightness {
                    *brightness = new_brightness;
                }
            }
            (
                DeviceKind::Lock { state, code },
                DeviceUpdate::Lock {
                    state: new_state,
                    code: new_code,
                },
            ) => {
                if let Some(new_state) = new_state {
                    *state = new_state;
                }
                if let Some(new_code) = new_code {
                    *code = new_code;
                }
            }
            (
                DeviceKind::Thermostat {
                    target_temp_f,
                    actual_temp_f,
                },
                DeviceUpdate::Thermostat {
                    target_temp_f: new_target,
                    actual_temp_f: new_actual,
                },
            ) => {
                if let Some(new_target) = new_target {
                    *target_temp_f = new_target;
                }
                if let Some(new_actual) = new_actual {
                    *actual_temp_f = new_actual;
                }
            }
            (kind, update) => {
                return Err(ValidationError::VariantMismatch {
                    expected: kind.variant(),
                    actual: update.variant(),
                });
            }
        }
        Ok(())
    }
}

struct OptionalId<'a, T>(Option<&'a T>);

impl<T: fmt::Display> fmt::Display for OptionalId<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => id.fmt(f),
            None => f.write_str("none"),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(id={}, hub={}",
            self.variant().type_name(),
            OptionalId(self.id.as_ref()),
            OptionalId(self.hub.as_ref()),
        )?;
        match &self.kind {
            DeviceKind::Switch { state } => write!(f, ", state={state}")?,
            DeviceKind::Dimmer { brightness } => write!(f, ", brightness={brightness}")?,
            DeviceKind::Lock { state, code } => {
                write!(f, ", state={state}, code=[{}]", code.join(", "))?;
            }
            DeviceKind::Thermostat {
                target_temp_f,
                actual_temp_f,
            } => write!(
                f,
                ", target_temp_f={target_temp_f:?}, actual_temp_f={actual_temp_f:?}"
            )?,
        }
        f.write_str(")")
    }
}
