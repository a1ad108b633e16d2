//! Device variant tags and per-variant state enums.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a [`Switch`](super::DeviceKind::Switch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    #[default]
    Off,
    On,
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::On => f.write_str("on"),
        }
    }
}

/// Bolt position of a [`Lock`](super::DeviceKind::Lock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockState {
    #[default]
    Unlocked,
    Locked,
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlocked => f.write_str("unlocked"),
            Self::Locked => f.write_str("locked"),
        }
    }
}

/// Payload-free tag naming a device variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceVariant {
    Switch,
    Dimmer,
    Lock,
    Thermostat,
}

impl DeviceVariant {
    /// Attribute names accepted when creating or updating this variant.
    #[must_use]
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Switch => &["state"],
            Self::Dimmer => &["brightness"],
            Self::Lock => &["state", "code"],
            Self::Thermostat => &["target_temp_f", "actual_temp_f"],
        }
    }

    /// Human-readable type name used in device descriptions.
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Switch => "Switch",
            Self::Dimmer => "Dimmer",
            Self::Lock => "Lock",
            Self::Thermostat => "Thermostat",
        }
    }
}

impl fmt::Display for DeviceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Switch => f.write_str("switch"),
            Self::Dimmer => f.write_str("dimmer"),
            Self::Lock => f.write_str("lock"),
            Self::Thermostat => f.write_str("thermostat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_switch_to_off_and_lock_to_unlocked() {
        assert_eq!(SwitchState::default(), SwitchState::Off);
        assert_eq!(LockState::default(), LockState::Unlocked);
    }

    #[test]
    fn should_display_variant_as_its_serde_tag() {
        for variant in [
            DeviceVariant::Switch,
            DeviceVariant::Dimmer,
            DeviceVariant::Lock,
            DeviceVariant::Thermostat,
        ] {
            let json = serde_json::to_value(variant).unwrap();
            assert_eq!(json, serde_json::Value::String(variant.to_string()));
        }
    }

    #[test]
    fn should_serialize_lock_state_lowercase() {
        let json = serde_json::to_string(&LockState::Locked).unwrap();
        assert_eq!(json, "\"locked\"");
    }
}
