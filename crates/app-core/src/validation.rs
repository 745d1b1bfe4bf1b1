//! Sign-in and sign-up form validation

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Minimum password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validation messages shown under the fields
pub mod messages {
    /// Empty name
    pub const NAME_REQUIRED: &str = "Le nom est requis";
    /// Empty email
    pub const EMAIL_REQUIRED: &str = "L'email est requis";
    /// Malformed email
    pub const EMAIL_INVALID: &str = "Email invalide";
    /// Empty password
    pub const PASSWORD_REQUIRED: &str = "Le mot de passe est requis";
    /// Password under the minimum length
    pub const PASSWORD_TOO_SHORT: &str = "Le mot de passe doit contenir au moins 8 caractères";
    /// Empty confirmation
    pub const CONFIRM_REQUIRED: &str = "Veuillez confirmer le mot de passe";
    /// Confirmation differs from the password
    pub const CONFIRM_MISMATCH: &str = "Les mots de passe ne correspondent pas";
}

/// Loose email shape check: something, `@`, something, `.`, something
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_REGEX.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));
    re.is_match(email)
}

/// A form field that can carry an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    /// Display name
    Name,
    /// Email address
    Email,
    /// Password
    Password,
    /// Password confirmation
    ConfirmPassword,
}

/// Per-field error messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    /// Name error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Password error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Confirmation error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_password: Option<String>,
}

impl FormErrors {
    /// Check whether no field has an error
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
    }

    /// Error for a field
    pub fn get(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Name => self.name.as_deref(),
            FormField::Email => self.email.as_deref(),
            FormField::Password => self.password.as_deref(),
            FormField::ConfirmPassword => self.confirm_password.as_deref(),
        }
    }

    /// Clear one field's error, as done when the user edits it
    pub fn clear(&mut self, field: FormField) {
        match field {
            FormField::Name => self.name = None,
            FormField::Email => self.email = None,
            FormField::Password => self.password = None,
            FormField::ConfirmPassword => self.confirm_password = None,
        }
    }
}

fn email_error(email: &str) -> Option<String> {
    if email.is_empty() {
        Some(messages::EMAIL_REQUIRED.to_string())
    } else if !is_valid_email(email) {
        Some(messages::EMAIL_INVALID.to_string())
    } else {
        None
    }
}

fn password_error(password: &str) -> Option<String> {
    if password.is_empty() {
        Some(messages::PASSWORD_REQUIRED.to_string())
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        Some(messages::PASSWORD_TOO_SHORT.to_string())
    } else {
        None
    }
}

/// Sign-in form contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInForm {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

impl SignInForm {
    /// Create a form
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }

    /// Validate every field
    pub fn validate(&self) -> FormErrors {
        FormErrors {
            email: email_error(&self.email),
            password: password_error(&self.password),
            ..Default::default()
        }
    }
}

/// Sign-up form contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Password, typed again
    pub confirm_password: String,
}

impl SignUpForm {
    /// Validate every field
    pub fn validate(&self) -> FormErrors {
        let confirm_password = if self.confirm_password.is_empty() {
            Some(messages::CONFIRM_REQUIRED.to_string())
        } else if self.password != self.confirm_password {
            Some(messages::CONFIRM_MISMATCH.to_string())
        } else {
            None
        };

        FormErrors {
            name: self.name.is_empty().then(|| messages::NAME_REQUIRED.to_string()),
            email: email_error(&self.email),
            password: password_error(&self.password),
            confirm_password,
        }
    }
}
