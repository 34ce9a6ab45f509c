use thiserror::Error;

/// Interaction modes that exclude each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Editing,
    ConfirmingDelete,
}

impl std::fmt::Display for Interaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interaction::Editing => f.write_str("editing"),
            Interaction::ConfirmingDelete => f.write_str("confirming delete"),
        }
    }
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("User not found: {id}")]
    NotFound { id: String },

    #[error("User id '{id}' already exists")]
    DuplicateId { id: String },

    #[error("Cannot start {attempted} while {active} is in progress")]
    ConflictingOperation {
        active: Interaction,
        attempted: Interaction,
    },

    #[error("No delete is awaiting confirmation")]
    NoPendingDelete,

    #[error("No draft is open")]
    NoOpenDraft,

    #[error("Unknown field: '{field}'")]
    UnknownField { field: String },

    #[error("Failed to fetch users: {message}")]
    Fetch { message: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    pub fn conflicting(active: Interaction, attempted: Interaction) -> Self {
        Self::ConflictingOperation { active, attempted }
    }

    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// True for errors that only a misbehaving caller can trigger.
    ///
    /// Validation, not-found, fetch and no-pending-delete errors are part of
    /// normal user flows; everything else points at a bug in the caller.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::DuplicateId { .. }
                | Self::ConflictingOperation { .. }
                | Self::UnknownField { .. }
                | Self::NoOpenDraft
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_violations_are_classified() {
        assert!(DomainError::duplicate_id("1").is_contract_violation());
        assert!(DomainError::unknown_field("age").is_contract_violation());
        assert!(DomainError::NoOpenDraft.is_contract_violation());
        assert!(
            DomainError::conflicting(Interaction::Editing, Interaction::ConfirmingDelete)
                .is_contract_violation()
        );

        assert!(!DomainError::validation("email", "missing '@'").is_contract_violation());
        assert!(!DomainError::not_found("1").is_contract_violation());
        assert!(!DomainError::fetch("timeout").is_contract_violation());
        assert!(!DomainError::NoPendingDelete.is_contract_violation());
    }

    #[test]
    fn messages_name_the_offender() {
        assert_eq!(
            DomainError::not_found("42").to_string(),
            "User not found: 42"
        );
        assert_eq!(
            DomainError::conflicting(Interaction::ConfirmingDelete, Interaction::Editing)
                .to_string(),
            "Cannot start editing while confirming delete is in progress"
        );
    }
}
