use super::StoreError;
use crate::models::{Record, Resource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Last id handed out per collection. Ids are never reused, even after deletes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequences {
    #[serde(default)]
    pub users: i64,
    #[serde(default)]
    pub roles: i64,
    #[serde(default)]
    pub permissions: i64,
}

impl Sequences {
    pub fn get(&self, resource: Resource) -> i64 {
        match resource {
            Resource::Users => self.users,
            Resource::Roles => self.roles,
            Resource::Permissions => self.permissions,
        }
    }

    fn slot(&mut self, resource: Resource) -> &mut i64 {
        match resource {
            Resource::Users => &mut self.users,
            Resource::Roles => &mut self.roles,
            Resource::Permissions => &mut self.permissions,
        }
    }

    /// Raise the counter to at least `id`.
    pub fn observe(&mut self, resource: Resource, id: i64) {
        let slot = self.slot(resource);
        *slot = (*slot).max(id);
    }

    /// Advance and return the next id.
    pub fn next(&mut self, resource: Resource) -> Result<i64, StoreError> {
        let slot = self.slot(resource);
        *slot = slot.checked_add(1).ok_or(StoreError::IdsExhausted(resource))?;
        Ok(*slot)
    }
}

/// Where collections live between process restarts.
///
/// Every `persist_*` call replaces the stored state wholesale.
#[async_trait]
pub trait CollectionBackend: Send + Sync {
    async fn load(&self, resource: Resource) -> Result<Vec<Record>, StoreError>;
    async fn persist(&self, resource: Resource, records: &[Record]) -> Result<(), StoreError>;
    async fn load_sequences(&self) -> Result<Sequences, StoreError>;
    async fn persist_sequences(&self, sequences: &Sequences) -> Result<(), StoreError>;
    async fn health_check(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_never_goes_below_observed_ids() {
        let mut sequences = Sequences::default();
        sequences.observe(Resource::Roles, 4);
        sequences.observe(Resource::Roles, 2);

        assert_eq!(sequences.next(Resource::Roles).unwrap(), 5);
        assert_eq!(sequences.next(Resource::Users).unwrap(), 1);
        assert_eq!(sequences.get(Resource::Permissions), 0);
    }

    #[test]
    fn next_refuses_to_wrap_past_the_largest_id() {
        let mut sequences = Sequences::default();
        sequences.observe(Resource::Users, i64::MAX);

        let err = sequences.next(Resource::Users).unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted(Resource::Users)));
        assert_eq!(sequences.get(Resource::Users), i64::MAX);
    }
}
