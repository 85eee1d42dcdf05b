use super::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Free text; matched against role names only by convention.
    #[serde(default, deserialize_with = "lenient::text")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub phone: Option<String>,
    #[serde(default)]
    pub permissions: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn permissions_display(&self) -> String {
        match &self.permissions {
            Some(Value::Array(items)) => items
                .iter()
                .map(lenient::display_value)
                .collect::<Vec<_>>()
                .join(", "),
            _ => "None".to_string(),
        }
    }

    pub fn email_display(&self) -> &str {
        or_not_available(&self.email)
    }

    pub fn phone_display(&self) -> &str {
        or_not_available(&self.phone)
    }
}

fn or_not_available(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => "N/A",
    }
}

/// The add-user form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewUserForm {
    #[validate(length(min = 1, message = "Name is required"))]
    #[serde(default)]
    pub name: String,
    #[validate(length(min = 1, message = "Role is required"))]
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl NewUserForm {
    /// Request body for `POST /users`; blank contact fields become `null`.
    pub fn to_body(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "role": self.role,
            "email": blank_as_null(&self.email),
            "phone": blank_as_null(&self.phone),
        })
    }
}

fn blank_as_null(value: &str) -> Value {
    if value.is_empty() {
        Value::Null
    } else {
        Value::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_helpers_fill_gaps() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "name": "Alice",
            "role": "Admin",
            "email": null,
            "phone": ""
        }))
        .unwrap();

        assert_eq!(user.permissions_display(), "None");
        assert_eq!(user.email_display(), "N/A");
        assert_eq!(user.phone_display(), "N/A");
    }

    #[test]
    fn permissions_array_is_joined() {
        let user: User =
            serde_json::from_value(json!({ "permissions": ["read", "write"] })).unwrap();
        assert_eq!(user.permissions_display(), "read, write");
    }

    #[test]
    fn form_requires_name_and_role() {
        let form = NewUserForm {
            name: "Bob".to_string(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role"));
        assert!(!errors.field_errors().contains_key("name"));
    }

    #[test]
    fn blank_contact_fields_are_sent_as_null() {
        let form = NewUserForm {
            name: "Bob".to_string(),
            role: "Viewer".to_string(),
            email: String::new(),
            phone: "555-0100".to_string(),
        };
        assert_eq!(
            form.to_body(),
            json!({ "name": "Bob", "role": "Viewer", "email": null, "phone": "555-0100" })
        );
    }
}
