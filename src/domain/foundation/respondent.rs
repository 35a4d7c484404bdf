//! Respondent identity types.
//!
//! Respondents are created by an external registration process. This core
//! only reads them: the directory port resolves an identifier into a
//! `RespondentProfile` carrying the already-decided role flag and the
//! organization the respondent belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DomainError, ErrorCode, OrganizationName, RespondentId};

/// Role flag resolved by the identity lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    #[default]
    Member,
}

impl Role {
    /// Stable storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Member => "member",
        }
    }

    /// Parses the storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "administrator" | "admin" => Some(Role::Administrator),
            "member" => Some(Role::Member),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A respondent as seen by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentProfile {
    pub id: RespondentId,
    pub display_name: Option<String>,
    pub organization: OrganizationName,
    pub role: Role,
}

impl RespondentProfile {
    /// Creates a new profile.
    pub fn new(
        id: RespondentId,
        display_name: Option<String>,
        organization: OrganizationName,
        role: Role,
    ) -> Self {
        Self {
            id,
            display_name,
            organization,
            role,
        }
    }

    /// Returns the display name, or the identifier as fallback.
    pub fn display_name_or_id(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.id.as_str())
    }

    /// Returns true for administrators.
    pub fn is_administrator(&self) -> bool {
        self.role == Role::Administrator
    }

    /// Fails with `Forbidden` unless this respondent is an administrator.
    pub fn require_administrator(&self) -> Result<(), DomainError> {
        if self.is_administrator() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                format!("{} is not an administrator", self.id),
            ))
        }
    }
}
