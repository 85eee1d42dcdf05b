//! Optimistic updates.
//!
//! A [`Mutation`] remembers the record as it was before the user's action and
//! the locally computed result. The console renders the optimistic record
//! while the request is in flight, then either the service's answer or the
//! original record plus an error.

#[derive(Debug, Clone)]
enum MutationStatus<T> {
    Pending,
    Applied(T),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Mutation<T> {
    snapshot: T,
    optimistic: T,
    status: MutationStatus<T>,
}

impl<T: Clone> Mutation<T> {
    /// Start from `snapshot` and apply `change` to a copy of it.
    pub fn begin(snapshot: T, change: impl FnOnce(&mut T)) -> Self {
        let mut optimistic = snapshot.clone();
        change(&mut optimistic);
        Self {
            snapshot,
            optimistic,
            status: MutationStatus::Pending,
        }
    }

    /// The record to send to the service.
    pub fn optimistic(&self) -> &T {
        &self.optimistic
    }

    /// Settle with the service's answer. Only a pending mutation changes state.
    pub fn settle<E: std::fmt::Display>(mut self, outcome: Result<T, E>) -> Self {
        if matches!(self.status, MutationStatus::Pending) {
            self.status = match outcome {
                Ok(record) => MutationStatus::Applied(record),
                Err(e) => MutationStatus::Failed(e.to_string()),
            };
        }
        self
    }

    /// What the view should show right now.
    pub fn visible(&self) -> &T {
        match &self.status {
            MutationStatus::Pending => &self.optimistic,
            MutationStatus::Applied(record) => record,
            MutationStatus::Failed(_) => &self.snapshot,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            MutationStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}
