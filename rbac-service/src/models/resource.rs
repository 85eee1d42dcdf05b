use super::{Actions, Record};
use serde_json::Value;
use std::fmt;

/// One of the three persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Roles,
    Permissions,
}

impl Resource {
    pub fn name(self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Roles => "roles",
            Resource::Permissions => "permissions",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }

    pub fn not_found_message(self) -> &'static str {
        match self {
            Resource::Users => "User not found",
            Resource::Roles => "Role not found",
            Resource::Permissions => "Permission not found",
        }
    }

    /// Fill fields a freshly created record of this kind must carry.
    ///
    /// Permissions get all-false `actions`; roles get an empty `permissions`
    /// list. Fields the client did send are left alone.
    pub fn apply_defaults(self, record: &mut Record) {
        match self {
            Resource::Users => {}
            Resource::Roles => {
                record
                    .entry("permissions")
                    .or_insert_with(|| Value::Array(Vec::new()));
            }
            Resource::Permissions => {
                record.entry("actions").or_insert_with(|| {
                    serde_json::to_value(Actions::default()).unwrap_or(Value::Null)
                });
            }
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
