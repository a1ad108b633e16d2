//! Partial updates and attribute-map parsing for devices.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Attributes, DeviceVariant, LockState, MAX_BRIGHTNESS, SwitchState};
use crate::error::ValidationError;

/// Closed, per-variant set of updatable fields. `None` leaves a field as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeviceUpdate {
    Switch {
        state: Option<SwitchState>,
    },
    Dimmer {
        brightness: Option<u8>,
    },
    Lock {
        state: Option<LockState>,
        code: Option<Vec<String>>,
    },
    Thermostat {
        target_temp_f: Option<f64>,
        actual_temp_f: Option<f64>,
    },
}

impl DeviceUpdate {
    #[must_use]
    pub fn variant(&self) -> DeviceVariant {
        match self {
            Self::Switch { .. } => DeviceVariant::Switch,
            Self::Dimmer { .. } => DeviceVariant::Dimmer,
            Self::Lock { .. } => DeviceVariant::Lock,
            Self::Thermostat { .. } => DeviceVariant::Thermostat,
        }
    }

    /// Build an update for `variant` from named attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownField`] for a name the variant does
    /// not have and [`ValidationError::InvalidAttributes`] for a value of the
    /// wrong type.
    pub fn from_attributes(
        variant: DeviceVariant,
        attributes: &Attributes,
    ) -> Result<Self, ValidationError> {
        let update: Self = tagged_from_attributes(variant, attributes)?;
        update.validate()?;
        Ok(update)
    }

    pub(super) fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Dimmer {
                brightness: Some(brightness),
            } if *brightness > MAX_BRIGHTNESS => {
                Err(ValidationError::BrightnessOutOfRange(*brightness))
            }
            _ => Ok(()),
        }
    }
}

/// Reject names outside the variant's field list and null values, then
/// deserialize the map with the variant tag injected.
pub(super) fn tagged_from_attributes<T: DeserializeOwned>(
    variant: DeviceVariant,
    attributes: &Attributes,
) -> Result<T, ValidationError> {
    let allowed = variant.fields();
    for (field, value) in attributes {
        if !allowed.contains(&field.as_str()) {
            return Err(ValidationError::UnknownField {
                variant,
                field: field.clone(),
            });
        }
        // `Option` fields would read null as absent.
        if value.is_null() {
            return Err(ValidationError::NullField {
                variant,
                field: field.clone(),
            });
        }
    }

    let mut object = attributes.clone();
    object.insert("kind".to_string(), Value::String(variant.to_string()));
    serde_json::from_value(Value::Object(object)).map_err(ValidationError::InvalidAttributes)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn attributes(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn should_leave_absent_fields_unset() {
        let update = DeviceUpdate::from_attributes(
            DeviceVariant::Lock,
            &attributes(json!({ "state": "locked" })),
        )
        .unwrap();
        assert_eq!(
            update,
            DeviceUpdate::Lock {
                state: Some(LockState::Locked),
                code: None,
            }
        );
    }

    #[test]
    fn should_accept_empty_attribute_map() {
        let update =
            DeviceUpdate::from_attributes(DeviceVariant::Switch, &Attributes::new()).unwrap();
        assert_eq!(update, DeviceUpdate::Switch { state: None });
    }

    #[test]
    fn should_fail_fast_on_unknown_field() {
        let result = DeviceUpdate::from_attributes(
            DeviceVariant::Switch,
            &attributes(json!({ "brightness": 10 })),
        );
        assert!(matches!(
            result,
            Err(ValidationError::UnknownField { variant: DeviceVariant::Switch, ref field })
                if field == "brightness"
        ));
    }

    #[test]
    fn should_reject_injected_kind_attribute() {
        let result = DeviceUpdate::from_attributes(
            DeviceVariant::Dimmer,
            &attributes(json!({ "kind": "switch" })),
        );
        assert!(matches!(result, Err(ValidationError::UnknownField { .. })));
    }

    #[test]
    fn should_reject_null_attribute_on_update() {
        let result = DeviceUpdate::from_attributes(
            DeviceVariant::Dimmer,
            &attributes(json!({ "brightness": null })),
        );
        assert!(matches!(
            result,
            Err(ValidationError::NullField { variant: DeviceVariant::Dimmer, ref field })
                if field == "brightness"
        ));
    }

    #[test]
    fn should_reject_null_among_valid_attributes() {
        let result = DeviceUpdate::from_attributes(
            DeviceVariant::Thermostat,
            &attributes(json!({ "target_temp_f": 70.0, "actual_temp_f": null })),
        );
        assert!(matches!(result, Err(ValidationError::NullField { .. })));
    }

    #[test]
    fn should_reject_value_of_wrong_type() {
        let result = DeviceUpdate::from_attributes(
            DeviceVariant::Dimmer,
            &attributes(json!({ "brightness": "bright" })),
        );
        assert!(matches!(result, Err(ValidationError::InvalidAttributes(_))));
    }
}
