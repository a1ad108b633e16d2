//! Device service — use-cases for managing devices.

use dwellhub_domain::device::{Attributes, Device, DeviceKind, DeviceUpdate, DeviceVariant};
use dwellhub_domain::error::DwellHubError;
use dwellhub_domain::id::DeviceId;

use crate::ports::DeviceRepository;

/// Application service for device CRUD operations.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    #[must_use]
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Build a device of `variant` from named attributes and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::Validation`] for unknown, missing or invalid
    /// attributes, or an error propagated from the repository.
    #[tracing::instrument(skip(self, attributes))]
    pub fn create_device(
        &self,
        variant: DeviceVariant,
        attributes: &Attributes,
    ) -> Result<Device, DwellHubError> {
        let kind = DeviceKind::from_attributes(variant, attributes)?;
        let device = self.repo.create(Device::new(kind))?;
        tracing::debug!(device = %device, "device created");
        Ok(device)
    }

    /// Look up a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when no device with `id` exists.
    #[tracing::instrument(skip(self))]
    pub fn get_device(&self, id: &DeviceId) -> Result<Device, DwellHubError> {
        self.repo.get(id)
    }

    /// Delete a device that is not paired to a hub.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the device does not exist, or
    /// [`DwellHubError::Constraint`] while it is still paired.
    #[tracing::instrument(skip(self))]
    pub fn delete_device(&self, id: &DeviceId) -> Result<(), DwellHubError> {
        let device = self.repo.get(id)?;
        self.repo.delete(&device)
    }

    /// Human-readable description of a device.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the device does not exist.
    #[tracing::instrument(skip(self))]
    pub fn show_device_info(&self, id: &DeviceId) -> Result<String, DwellHubError> {
        Ok(self.repo.get(id)?.to_string())
    }

    /// List all devices in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error propagated from the repository.
    pub fn list_devices(&self) -> Result<Vec<Device>, DwellHubError> {
        self.repo.list()
    }

    /// Apply named attributes to an existing device and persist it.
    ///
    /// Attribute names are checked against the stored device's variant
    /// before anything is assigned.
    ///
    /// # Errors
    ///
    /// Returns [`DwellHubError::NotFound`] when the device does not exist,
    /// or [`DwellHubError::Validation`] for an unknown or invalid attribute.
    #[tracing::instrument(skip(self, attributes))]
    pub fn update_device(
        &self,
        id: &DeviceId,
        attributes: &Attributes,
    ) -> Result<Device, DwellHubError> {
        let mut device = self.repo.get(id)?;
        let update = DeviceUpdate::from_attributes(device.variant(), attributes)?;
        device.apply(update)?;
        self.repo.save(&device)?;
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use dwellhub_domain::device::{LockState, SwitchState};
    use dwellhub_domain::error::{ConstraintViolation, ValidationError};
    use dwellhub_domain::hub::Hub;
    use serde_json::{Value, json};

    use super::*;
    use crate::ports::HubRepository;
    use crate::services::fakes::FakeStore;

    fn attributes(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn should_create_device_with_fresh_id() {
        let store = FakeStore::default();
        let svc = DeviceService::new(&store);

        let device = svc
            .create_device(DeviceVariant::Dimmer, &attributes(json!({ "brightness": 40 })))
            .unwrap();

        assert!(device.id.is_some());
        assert_eq!(device.kind, DeviceKind::Dimmer { brightness: 40 });
        assert_eq!(svc.get_device(device.id.as_ref().unwrap()).unwrap(), device);
    }

    #[test]
    fn should_reject_create_with_unknown_attribute() {
        let store = FakeStore::default();
        let svc = DeviceService::new(&store);

        let result = svc.create_device(
            DeviceVariant::Switch,
            &attributes(json!({ "state": "on", "invalid": true })),
        );

        assert!(matches!(
            result,
            Err(DwellHubError::Validation(ValidationError::UnknownField { .. }))
        ));
        assert_eq!(store.device_count(), 0);
    }

    #[test]
    fn should_return_not_found_when_device_missing() {
        let store = FakeStore::default();
        let svc = DeviceService::new(&store);
        let id = DeviceId::new("not-here").unwrap();

        assert!(matches!(svc.get_device(&id), Err(DwellHubError::NotFound(_))));
        assert!(matches!(svc.delete_device(&id), Err(DwellHubError::NotFound(_))));
        assert!(matches!(
            svc.show_device_info(&id),
            Err(DwellHubError::NotFound(_))
        ));
        assert!(matches!(
            svc.update_device(&id, &Attributes::new()),
            Err(DwellHubError::NotFound(_))
        ));
    }

    #[test]
    fn should_delete_unpaired_device() {
        let store = FakeStore::default();
        let svc = DeviceService::new(&store);
        let device = svc
            .create_device(DeviceVariant::Switch, &attributes(json!({ "state": "off" })))
            .unwrap();
        let id = device.id.unwrap();

        svc.delete_device(&id).unwrap();

        assert!(svc.list_devices().unwrap().is_empty());
    }

    #[test]
    fn should_refuse_to_delete_paired_device() {
        let store = FakeStore::default();
        let svc = DeviceService::new(&store);
        let mut lock = svc
            .create_device(DeviceVariant::Lock, &attributes(json!({ "state": "locked" })))
            .unwrap();
        let mut hub = HubRepository::create(&store, Hub::new()).unwrap();
        hub.pair_device(&mut lock).unwrap();
        HubRepository::save(&store, &hub).unwrap();

        let result = svc.delete_device(lock.id.as_ref().unwrap());

        assert!(matches!(
            result,
            Err(DwellHubError::Constraint(ConstraintViolation::DevicePaired { .. }))
        ));
        assert_eq!(svc.list_devices().unwrap(), vec![lock]);
    }

    #[test]
    fn should_show_device_info() {
        let store = FakeStore::default();
        let svc = DeviceService::new(&store);
        let device = svc
            .create_device(
                DeviceVariant::Lock,
                &attributes(json!({ "state": "locked", "code": ["1", "2", "3"] })),
            )
            .unwrap();

        let info = svc.show_device_info(device.id.as_ref().unwrap()).unwrap();

        assert_eq!(
            info,
            "Lock(id=fake-1, hub=none, state=locked, code=[1, 2, 3])"
        );
    }

    #[test]
    fn should_list_devices_in_creation_order() {
        let store = FakeStore::default();
        let svc = DeviceService::new(&store);
        let switch = svc
            .create_device(DeviceVariant::Switch, &attributes(json!({ "state": "on" })))
            .unwrap();
        let dimmer = svc
            .create_device(DeviceVariant::Dimmer, &attributes(json!({ "brightness": 5 })))
            .unwrap();

        assert_eq!(svc.list_devices().unwrap(), vec![switch, dimmer]);
    }

    #[test]
    fn should_update_device_and_persist() {
        let store = FakeStore::default();
        let svc = DeviceService::new(&store);
        let lock = svc
            .create_device(DeviceVariant::Lock, &attributes(json!({ "state": "unlocked" })))
            .unwrap();
        let id = lock.id.unwrap();

        let updated = svc
            .update_device(&id, &attributes(json!({ "state": "locked" })))
            .unwrap();

        assert_eq!(
            updated.kind,
            DeviceKind::Lock {
                state: LockState::Locked,
                code: Vec::new(),
            }
        );
        assert_eq!(svc.get_device(&id).unwrap(), updated);
    }

    #[test]
    fn should_fail_fast_when_updating_unknown_field() {
        let store = FakeStore::default();
        let svc = DeviceService::new(&store);
        let switch = svc
            .create_device(DeviceVariant::Switch, &attributes(json!({ "state": "on" })))
            .unwrap();
        let id = switch.id.clone().unwrap();

        let result = svc.update_device(&id, &attributes(json!({ "brightness": 80 })));

        assert!(matches!(
            result,
            Err(DwellHubError::Validation(ValidationError::UnknownField { .. }))
        ));
        assert_eq!(
            svc.get_device(&id).unwrap().kind,
            DeviceKind::Switch {
                state: SwitchState::On
            }
        );
    }

    #[test]
    fn should_reject_null_attribute_and_keep_stored_value() {
        let store = FakeStore::default();
        let svc = DeviceService::new(&store);
        let dimmer = svc
            .create_device(DeviceVariant::Dimmer, &attributes(json!({ "brightness": 40 })))
            .unwrap();
        let id = dimmer.id.clone().unwrap();

        let result = svc.update_device(&id, &attributes(json!({ "brightness": null })));

        assert!(matches!(
            result,
            Err(DwellHubError::Validation(ValidationError::NullField { .. }))
        ));
        assert_eq!(
            svc.get_device(&id).unwrap().kind,
            DeviceKind::Dimmer { brightness: 40 }
        );
    }
}
