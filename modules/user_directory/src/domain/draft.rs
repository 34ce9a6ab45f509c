use crate::contract::model::{User, UserDraft, UserField, UserStatus};
use crate::domain::error::DomainError;

/// Where the draft in the buffer came from, which decides how it is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOrigin {
    New,
    Existing { id: String },
}

#[derive(Debug, Clone)]
struct OpenDraft {
    origin: DraftOrigin,
    draft: UserDraft,
}

/// Holds the user being created or edited while the form is open.
///
/// Nothing in here reaches the entity store until the controller saves it.
#[derive(Debug, Clone)]
pub struct DraftBuffer {
    defaults: UserDraft,
    open: Option<OpenDraft>,
}

impl DraftBuffer {
    /// `defaults` seeds every create form.
    pub fn new(defaults: UserDraft) -> Self {
        Self {
            defaults,
            open: None,
        }
    }

    /// Open the buffer, seeded from `existing` or reset to the defaults.
    /// Whatever was open before is dropped.
    pub fn open(&mut self, existing: Option<&User>) {
        let opened = match existing {
            Some(user) => OpenDraft {
                origin: DraftOrigin::Existing {
                    id: user.id.clone(),
                },
                draft: user.to_draft(),
            },
            None => OpenDraft {
                origin: DraftOrigin::New,
                draft: self.defaults.clone(),
            },
        };
        self.open = Some(opened);
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), DomainError> {
        let field = UserField::parse(field).ok_or_else(|| DomainError::unknown_field(field))?;
        let open = self.open.as_mut().ok_or(DomainError::NoOpenDraft)?;
        let value = value.into();

        match field {
            UserField::Name => open.draft.name = value,
            UserField::Email => open.draft.email = value,
            UserField::Role => open.draft.role = value,
            UserField::Status => {
                open.draft.status = UserStatus::parse(&value).ok_or_else(|| {
                    DomainError::validation("status", format!("'{value}' is not a valid status"))
                })?;
            }
        }
        Ok(())
    }

    /// Current contents. The buffer stays open.
    pub fn commit(&self) -> Option<UserDraft> {
        self.open.as_ref().map(|o| o.draft.clone())
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn origin(&self) -> Option<&DraftOrigin> {
        self.open.as_ref().map(|o| &o.origin)
    }
}
