//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`DwellHubError`] via `#[from]`.

use crate::device::DeviceVariant;

/// Top-level error returned by domain operations, repositories and services.
#[derive(Debug, thiserror::Error)]
pub enum DwellHubError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    AlreadyExists(#[from] AlreadyExistsError),

    #[error("constraint violation")]
    Constraint(#[from] ConstraintViolation),

    /// Failure inside a storage adapter.
    #[error("storage error")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// A value does not satisfy a domain invariant.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{entity} has no id yet")]
    MissingId { entity: &'static str },

    #[error("identifier must not be empty")]
    EmptyId,

    #[error("brightness {0} is outside 0..=100")]
    BrightnessOutOfRange(u8),

    #[error("unknown attribute `{field}` for {variant}")]
    UnknownField {
        variant: DeviceVariant,
        field: String,
    },

    #[error("attribute `{field}` of {variant} must not be null")]
    NullField {
        variant: DeviceVariant,
        field: String,
    },

    #[error("invalid attributes")]
    InvalidAttributes(#[source] serde_json::Error),

    #[error("expected a {expected} update, got {actual}")]
    VariantMismatch {
        expected: DeviceVariant,
        actual: DeviceVariant,
    },

    #[error("{member} {member_id} does not point back to {owner} {owner_id}")]
    BrokenBackReference {
        owner: &'static str,
        owner_id: String,
        member: &'static str,
        member_id: String,
    },
}

/// A lookup by id found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// An entity that already carries an id was handed to `create`.
#[derive(Debug, thiserror::Error)]
#[error("{entity} already exists: {id}")]
pub struct AlreadyExistsError {
    pub entity: &'static str,
    pub id: String,
}

/// A referential-integrity rule would be broken.
#[derive(Debug, thiserror::Error)]
pub enum ConstraintViolation {
    #[error("device {device} is still paired to hub {hub}")]
    DevicePaired { device: String, hub: String },

    #[error("device {device} is already paired to hub {hub}")]
    DevicePairedElsewhere { device: String, hub: String },

    #[error("hub {hub} is still installed in dwelling {dwelling}")]
    HubInstalled { hub: String, dwelling: String },

    #[error("hub {hub} is already installed in dwelling {dwelling}")]
    HubInstalledElsewhere { hub: String, dwelling: String },

    #[error("hub {hub} still has {count} paired device(s)")]
    HubHasDevices { hub: String, count: usize },

    #[error("dwelling {dwelling} still has {count} installed hub(s)")]
    DwellingHasHubs { dwelling: String, count: usize },
}

impl DwellHubError {
    /// Shorthand for the not-found case.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        NotFoundError {
            entity,
            id: id.to_string(),
        }
        .into()
    }
}
