//! User types.

use rarebooks_catalog::UserId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Account role as reported by the login endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Buyer browsing the catalog.
    #[default]
    Reader,
    /// Account that lists books for sale.
    Seller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reader => "reader",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reader" | "user" | "buyer" => Ok(Role::Reader),
            "seller" => Ok(Role::Seller),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

// Unknown roles from newer API versions degrade to the least privileged one.
impl From<String> for Role {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// The signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Name for the header, falling back to the email.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }

    pub fn is_seller(&self) -> bool {
        matches!(self.role, Role::Seller | Role::Admin)
    }
}
