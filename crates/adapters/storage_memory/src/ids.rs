//! Identifier generation strategies.

use std::cell::Cell;

/// Source of fresh, unique identifiers for newly created aggregates.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic `{prefix}-1`, `{prefix}-2`, … identifiers.
///
/// Counts are shared across all aggregate kinds, so the third entity created
/// in a store gets `{prefix}-3` whatever its type.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: Cell<u64>,
}

impl SequentialIds {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Cell::new(0),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("uuid")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let next = self.counter.get() + 1;
        self.counter.set(next);
        format!("{}-{next}", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_uuids() {
        let ids = UuidIds;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    #[test]
    fn should_count_up_from_one() {
        let ids = SequentialIds::default();
        assert_eq!(ids.next_id(), "uuid-1");
        assert_eq!(ids.next_id(), "uuid-2");
        assert_eq!(ids.next_id(), "uuid-3");
    }

    #[test]
    fn should_use_custom_prefix() {
        let ids = SequentialIds::new("dev");
        assert_eq!(ids.next_id(), "dev-1");
    }
}
