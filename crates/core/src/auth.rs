use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AppError, CompanyId};

/// Closed set of roles the client recognises.
///
/// Role values on the wire and in persisted session state are camelCase
/// (`superAdmin`, `admin`, `user`); anything else fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Platform operator with access to cross-company administration.
    #[serde(rename = "superAdmin")]
    SuperAdmin,
    /// Company administrator.
    #[serde(rename = "admin")]
    Admin,
    /// Regular workforce member.
    #[serde(rename = "user")]
    User,
}

impl Role {
    /// Returns the stable wire value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "superAdmin",
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[Role::SuperAdmin, Role::Admin, Role::User];

        ALL
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "superAdmin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}

/// Authenticated session record persisted by the client.
///
/// Created on successful login and held verbatim until logout. The token is
/// assumed valid until a backend call rejects it; no expiry is checked
/// locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: String,
    role: Role,
    token: String,
    #[serde(default)]
    firstname: Option<String>,
    #[serde(default)]
    lastname: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    company_id: Option<CompanyId>,
}

impl Principal {
    /// Creates a principal from login response data.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        role: Role,
        token: impl Into<String>,
        firstname: Option<String>,
        lastname: Option<String>,
        email: Option<String>,
        company_id: Option<CompanyId>,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            token: token.into(),
            firstname,
            lastname,
            email,
            company_id,
        }
    }

    /// Returns the backend-assigned account identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the role carried by the session.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the bearer credential for backend calls.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Returns the first name, if the backend returned one.
    #[must_use]
    pub fn firstname(&self) -> Option<&str> {
        self.firstname.as_deref()
    }

    /// Returns the last name, if the backend returned one.
    #[must_use]
    pub fn lastname(&self) -> Option<&str> {
        self.lastname.as_deref()
    }

    /// Returns the email, if the backend returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the company the account belongs to, if any.
    #[must_use]
    pub fn company_id(&self) -> Option<&CompanyId> {
        self.company_id.as_ref()
    }
}
