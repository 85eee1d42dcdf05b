use super::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The three flags every permission carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actions {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub read: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub write: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub delete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
    Delete,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Read, Action::Write, Action::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Delete => "delete",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Read => "Read",
            Action::Write => "Write",
            Action::Delete => "Delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown action `{0}`")]
pub struct UnknownAction(String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Action::Read),
            "write" => Ok(Action::Write),
            "delete" => Ok(Action::Delete),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

impl Actions {
    pub fn get(&self, action: Action) -> bool {
        match action {
            Action::Read => self.read,
            Action::Write => self.write,
            Action::Delete => self.delete,
        }
    }

    pub fn toggle(&mut self, action: Action) {
        let flag = match action {
            Action::Read => &mut self.read,
            Action::Write => &mut self.write,
            Action::Delete => &mut self.delete,
        };
        *flag = !*flag;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub actions: Actions,
    /// Fields the console does not know about, sent back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Permission {
    pub fn toggle_action(&mut self, action: Action) {
        self.actions.toggle(action);
    }
}
