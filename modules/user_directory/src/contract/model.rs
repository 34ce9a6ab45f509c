use serde::{Deserialize, Serialize};
use std::fmt;

/// Account status as shown in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }

    /// Case-insensitive parse of the two declared values.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => Some(UserStatus::Active),
            "inactive" => Some(UserStatus::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user record held by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Opaque identity; assigned on creation and never changed.
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: UserStatus,
    /// Display timestamp of the last login, or the "never" sentinel.
    pub last_login: String,
}

impl User {
    /// The editable part of the record.
    pub fn to_draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            status: self.status,
        }
    }

    /// Build a record from a draft, keeping identity and login stamp from the caller.
    pub fn from_draft(id: String, draft: UserDraft, last_login: String) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            role: draft.role,
            status: draft.status,
            last_login,
        }
    }
}

/// Editable fields of a user while a create or edit form is open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: UserStatus,
}

/// Names of the fields a draft may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Name,
    Email,
    Role,
    Status,
}

impl UserField {
    pub const ALL: [UserField; 4] = [
        UserField::Name,
        UserField::Email,
        UserField::Role,
        UserField::Status,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            UserField::Name => "name",
            UserField::Email => "email",
            UserField::Role => "role",
            UserField::Status => "status",
        }
    }

    /// Exact match on the field name; `None` for anything not editable.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == raw)
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
