use crate::app_lib::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Profile record from `GET /accounts/me/`. The backend is loose about shapes,
/// so every field is optional and `department`/`batch` stay raw.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub role: Option<String>,
    pub department: Value,
    pub batch: Value,
    pub is_verified: bool,
    pub is_active: bool,
    pub profile_picture: Option<String>,
}

impl Profile {
    #[must_use]
    pub fn department_label(&self) -> String {
        display_value(&self.department)
    }

    #[must_use]
    pub fn batch_label(&self) -> String {
        display_value(&self.batch)
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Alumni")
    }
}

/// Strings as-is, numbers formatted, objects by their `name`; null is empty.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Object(map) => map.get("name").map(display_value).unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Image attached to a profile update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfilePicture {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Form body for `PUT /accounts/me/`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub department: String,
    pub batch: String,
    pub picture: Option<ProfilePicture>,
}

impl ProfileUpdate {
    /// Prefills the edit form from the current profile.
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone().unwrap_or_default(),
            department: profile.department_label(),
            batch: profile.batch_label(),
            picture: None,
        }
    }

    /// # Errors
    /// Returns `AppError::Validation` when the name is blank.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Name is required.".to_string()));
        }
        Ok(())
    }
}
