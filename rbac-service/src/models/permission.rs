use serde::{Deserialize, Serialize};

/// The `{read, write, delete}` flags carried by a permission, and copied into
/// every role that references it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actions {
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub write: bool,
    #[serde(default)]
    pub delete: bool,
}
