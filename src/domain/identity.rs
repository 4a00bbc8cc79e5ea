use serde::{Deserialize, Serialize};
use std::fmt;

/// Account type as reported by the API's `tipo` field.
///
/// Anything other than `empleado` (case-insensitive) is a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Employee,
    #[default]
    Customer,
}

impl From<String> for Role {
    fn from(tipo: String) -> Self {
        if tipo.trim().eq_ignore_ascii_case("empleado") {
            Role::Employee
        } else {
            Role::Customer
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Employee => write!(f, "empleado"),
            Role::Customer => write!(f, "usuario"),
        }
    }
}

/// The logged-in account as the client knows it. The credential itself is
/// the session cookie held by the HTTP client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "usuario", default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "tipo", default)]
    pub role: Role,
}

impl Identity {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            id: None,
            username: Some(username.into()),
            full_name: None,
            email: None,
            role,
        }
    }

    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.full_name.as_deref())
            .or(self.email.as_deref())
            .unwrap_or("guest")
    }

    /// Identifier sent with orders; falls back to the username.
    pub fn reference(&self) -> &str {
        self.id.as_deref().unwrap_or_else(|| self.display_name())
    }
}

/// Login form payload.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    #[serde(rename = "contraseña")]
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("email", &self.email).finish_non_exhaustive()
    }
}

/// Registration form payload. Self-registered accounts are always customers.
#[derive(Clone, Serialize)]
pub struct Registration {
    pub email: String,
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "contraseña")]
    pub password: String,
    #[serde(rename = "tipo")]
    pub role: Role,
}

impl Registration {
    pub fn customer(email: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
            role: Role::Customer,
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
