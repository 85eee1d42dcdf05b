use serde::Deserialize;
use validator::{Validate, ValidationErrors};

/// Single-field form used to add a role or a permission.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NameForm {
    #[validate(length(min = 1, message = "Name cannot be empty!"))]
    #[serde(default)]
    pub name: String,
}

impl NameForm {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

/// First message out of a validation failure, for the error banner.
pub fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid input".to_string())
}
