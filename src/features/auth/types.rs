//! Request and response types for account endpoints. Passwords are held as
//! `SecretString` so they never end up in debug output or logs.

use crate::app_lib::AppError;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Student,
    Teacher,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "student" => Some(Role::Student),
            "teacher" => Some(Role::Teacher),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student/Alumni",
            Role::Teacher => "Teacher",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Registration form; sent as multipart with the department id.
#[derive(Clone, Debug)]
pub struct RegisterRequest {
    pub student_id: String,
    pub email: String,
    pub name: String,
    pub password: SecretString,
    pub role: Role,
    pub department: String,
}

impl RegisterRequest {
    /// # Errors
    /// Returns `AppError::Validation` naming the first missing or malformed field.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.student_id.trim().is_empty() {
            return Err(AppError::Validation("Student ID is required.".to_string()));
        }
        validate_email(&self.email)?;
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Full name is required.".to_string()));
        }
        if self.password.expose_secret().trim().is_empty() {
            return Err(AppError::Validation("Password is required.".to_string()));
        }
        if self.department.trim().is_empty() {
            return Err(AppError::Validation(
                "Please select a department.".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

impl LoginRequest {
    /// # Errors
    /// Returns `AppError::Validation` if either field is blank.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() || self.password.expose_secret().trim().is_empty() {
            return Err(AppError::Validation(
                "Email and password are required.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Wire shape of the login body; borrows the exposed password only for the
/// duration of serialization.
#[derive(Serialize)]
pub(crate) struct LoginPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Raw login response; a missing token is rejected by the client.
#[derive(Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: UserRecord,
}

/// User payload returned by the backend. The core stores it verbatim and only
/// reads a few display fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(pub Value);

impl UserRecord {
    fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.text("email")
    }

    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.text("role")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: String,
}

impl Department {
    #[must_use]
    pub fn label(&self) -> String {
        if self.code.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.code)
        }
    }
}

/// Lightweight email sanity check; the backend remains authoritative.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// # Errors
/// Returns `AppError::Validation` if the email is blank or malformed.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Email is required.".to_string()));
    }
    if !valid_email(trimmed) {
        return Err(AppError::Validation(
            "Email address looks invalid.".to_string(),
        ));
    }
    Ok(())
}
