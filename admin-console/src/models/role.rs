use super::lenient;
use super::permission::{Action, Actions};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A role's copy of a permission's flags. Not kept in sync with the
/// permission itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionRef {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub actions: Actions,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PermissionRef {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            actions: Actions::default(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub permissions: Vec<PermissionRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Role {
    pub fn has_permission(&self, permission_id: i64) -> bool {
        self.permissions.iter().any(|p| p.id == permission_id)
    }

    /// Whether any reference to `permission_id` grants `action`.
    pub fn grants(&self, permission_id: i64, action: Action) -> bool {
        self.permissions
            .iter()
            .any(|p| p.id == permission_id && p.actions.get(action))
    }

    /// Drop every reference to `permission_id`, or append a fresh one with all
    /// flags off when there is none.
    pub fn toggle_permission(&mut self, permission_id: i64) {
        if self.has_permission(permission_id) {
            self.permissions.retain(|p| p.id != permission_id);
        } else {
            self.permissions.push(PermissionRef::new(permission_id));
        }
    }

    /// Flip `action` on each reference to `permission_id`. A permission the
    /// role does not reference is left alone.
    pub fn toggle_permission_action(&mut self, permission_id: i64, action: Action) {
        for reference in self.permissions.iter_mut().filter(|p| p.id == permission_id) {
            reference.actions.toggle(action);
        }
    }
}
