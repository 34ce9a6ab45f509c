use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::config::DirectoryConfig;
use crate::contract::model::{User, UserDraft};
use crate::domain::draft::{DraftBuffer, DraftOrigin};
use crate::domain::error::{DomainError, Interaction};
use crate::domain::events::DirectoryEvent;
use crate::domain::filter;
use crate::domain::gate::ConfirmationGate;
use crate::domain::ports::{EventPublisher, IdGenerator, ListingPort};
use crate::domain::store::EntityStore;

/// Outcome of the last listing fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Where the session stands, as a single value.
///
/// `Editing` and `ConfirmingDelete` take precedence over the load state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed,
    Editing,
    ConfirmingDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied { count: usize },
    /// A later refresh was started before this one resolved; its result was dropped.
    Superseded,
}

struct Session {
    store: EntityStore<User>,
    query: String,
    draft: DraftBuffer,
    gate: ConfirmationGate<String>,
    load_state: LoadState,
    last_error: Option<String>,
    /// Token of the most recently started refresh.
    latest_refresh: u64,
}

impl Session {
    fn active_interaction(&self) -> Option<Interaction> {
        if self.draft.is_open() {
            Some(Interaction::Editing)
        } else if self.gate.is_open() {
            Some(Interaction::ConfirmingDelete)
        } else {
            None
        }
    }
}

/// One directory session: the loaded users, the search query, the open form
/// and the pending delete, with the operations below as the only way to change them.
///
/// Every operation takes `&self`; state sits behind a single lock that is never
/// held across the listing fetch, so a slow `refresh` does not block anything else.
pub struct DirectoryController {
    listing: Arc<dyn ListingPort>,
    ids: Arc<dyn IdGenerator>,
    events: Arc<dyn EventPublisher<DirectoryEvent>>,
    config: DirectoryConfig,
    session: Mutex<Session>,
}

impl DirectoryController {
    pub fn new(
        listing: Arc<dyn ListingPort>,
        ids: Arc<dyn IdGenerator>,
        events: Arc<dyn EventPublisher<DirectoryEvent>>,
        config: DirectoryConfig,
    ) -> Self {
        let defaults = UserDraft {
            role: config.default_role.clone(),
            status: config.default_status,
            ..Default::default()
        };
        Self {
            listing,
            ids,
            events,
            config,
            session: Mutex::new(Session {
                store: EntityStore::new(),
                query: String::new(),
                draft: DraftBuffer::new(defaults),
                gate: ConfirmationGate::default(),
                load_state: LoadState::Idle,
                last_error: None,
                latest_refresh: 0,
            }),
        }
    }

    // --- loading ---

    /// Reload the store from the listing collaborator.
    ///
    /// On failure the previously loaded users stay in place and the load state
    /// becomes `Error`. Results of a refresh overtaken by a newer one are dropped.
    #[instrument(name = "user_directory.controller.refresh", skip(self))]
    pub async fn refresh(&self) -> Result<RefreshOutcome, DomainError> {
        let token = {
            let mut s = self.session.lock();
            s.latest_refresh += 1;
            s.load_state = LoadState::Loading;
            s.latest_refresh
        };
        debug!(token, "Fetching users");

        let fetched = self.listing.fetch_resources().await;

        let mut s = self.session.lock();
        if token != s.latest_refresh {
            debug!(
                token,
                latest = s.latest_refresh,
                "Discarding result of superseded refresh"
            );
            return Ok(RefreshOutcome::Superseded);
        }

        let loaded = fetched
            .map_err(|e| DomainError::fetch(e.to_string()))
            .and_then(|records| {
                let count = records.len();
                s.store.load(records).map(|()| count)
            });

        match loaded {
            Ok(count) => {
                s.load_state = LoadState::Ready;
                s.last_error = None;
                drop(s);

                self.events.publish(&DirectoryEvent::Loaded {
                    count,
                    at: Utc::now(),
                });
                info!(count, "Users loaded");
                Ok(RefreshOutcome::Applied { count })
            }
            Err(e) => {
                s.load_state = LoadState::Error;
                s.last_error = Some(e.to_string());
                let kept = s.store.len();
                drop(s);

                warn!(error = %e, kept, "Refresh failed, keeping previously loaded users");
                Err(surface(e))
            }
        }
    }

    // --- search ---

    /// Set the filter query and return the users it leaves visible.
    #[instrument(
        name = "user_directory.controller.search",
        skip_all,
        fields(query = %query.as_ref())
    )]
    pub fn search(&self, query: impl AsRef<str>) -> Vec<User> {
        let mut s = self.session.lock();
        s.query = query.as_ref().to_string();
        let out: Vec<User> = filter::visible(s.store.records(), &s.query)
            .into_iter()
            .cloned()
            .collect();
        debug!(visible = out.len(), "Search applied");
        out
    }

    // --- editing ---

    /// Open an empty create form. An edit already in progress is dropped.
    #[instrument(name = "user_directory.controller.begin_create", skip(self))]
    pub fn begin_create(&self) -> Result<(), DomainError> {
        let mut s = self.session.lock();
        if s.gate.is_open() {
            return Err(surface(DomainError::conflicting(
                Interaction::ConfirmingDelete,
                Interaction::Editing,
            )));
        }
        s.draft.open(None);
        debug!("Create form opened");
        Ok(())
    }

    /// Open the edit form seeded from the user stored under `id`.
    #[instrument(name = "user_directory.controller.begin_edit", skip_all, fields(user_id = %id))]
    pub fn begin_edit(&self, id: &str) -> Result<(), DomainError> {
        let mut s = self.session.lock();
        if s.gate.is_open() {
            return Err(surface(DomainError::conflicting(
                Interaction::ConfirmingDelete,
                Interaction::Editing,
            )));
        }
        let user = s
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(id))?;
        s.draft.open(Some(&user));
        debug!("Edit form opened");
        Ok(())
    }

    /// Change one field of the open form.
    #[instrument(name = "user_directory.controller.set_field", skip(self, value))]
    pub fn set_field(&self, field: &str, value: impl Into<String>) -> Result<(), DomainError> {
        self.session.lock().draft.set(field, value).map_err(surface)
    }

    /// Validate the open form and write it to the store.
    ///
    /// A create gets a fresh id and the "never logged in" stamp; an edit keeps
    /// the stored id and last login. On any error the store is untouched and
    /// the form stays open.
    #[instrument(name = "user_directory.controller.save", skip(self))]
    pub fn save(&self) -> Result<User, DomainError> {
        let mut guard = self.session.lock();
        let s = &mut *guard;

        let (origin, draft) = match (s.draft.origin().cloned(), s.draft.commit()) {
            (Some(origin), Some(draft)) => (origin, draft),
            _ => return Err(surface(DomainError::NoOpenDraft)),
        };
        self.validate(&draft)?;

        let (user, event) = match origin {
            DraftOrigin::Existing { id } => {
                let last_login = s
                    .store
                    .get(&id)
                    .map(|u| u.last_login.clone())
                    .ok_or_else(|| DomainError::not_found(&id))?;
                let user = User::from_draft(id.clone(), draft, last_login);
                s.store.replace(&id, user.clone()).map_err(surface)?;
                let event = DirectoryEvent::Updated { id, at: Utc::now() };
                (user, event)
            }
            DraftOrigin::New => {
                let id = self.ids.new_id();
                let user = User::from_draft(id.clone(), draft, self.config.never_logged_in.clone());
                s.store.insert(user.clone()).map_err(surface)?;
                let event = DirectoryEvent::Created { id, at: Utc::now() };
                (user, event)
            }
        };
        s.draft.close();
        drop(guard);

        self.events.publish(&event);
        info!(user_id = %user.id, "User saved");
        Ok(user)
    }

    /// Close the form without touching the store.
    #[instrument(name = "user_directory.controller.cancel_edit", skip(self))]
    pub fn cancel_edit(&self) {
        self.session.lock().draft.close();
    }

    // --- deleting ---

    /// Arm the delete confirmation for `id`. Nothing is removed yet.
    #[instrument(
        name = "user_directory.controller.request_delete",
        skip_all,
        fields(user_id = %id)
    )]
    pub fn request_delete(&self, id: &str) -> Result<(), DomainError> {
        let mut s = self.session.lock();
        if s.draft.is_open() {
            return Err(surface(DomainError::conflicting(
                Interaction::Editing,
                Interaction::ConfirmingDelete,
            )));
        }
        if !s.store.contains(id) {
            return Err(DomainError::not_found(id));
        }
        s.gate.request(id.to_string());
        debug!("Delete awaiting confirmation");
        Ok(())
    }

    /// Remove the pending target from the store.
    ///
    /// The gate closes even when the target vanished in a refresh meanwhile;
    /// that case reports `NotFound`.
    #[instrument(name = "user_directory.controller.confirm_delete", skip(self))]
    pub fn confirm_delete(&self) -> Result<User, DomainError> {
        let mut s = self.session.lock();
        let id = s.gate.confirm()?;
        let removed = s.store.remove(&id)?;
        drop(s);

        self.events.publish(&DirectoryEvent::Deleted {
            id: removed.id.clone(),
            at: Utc::now(),
        });
        info!(user_id = %removed.id, "User deleted");
        Ok(removed)
    }

    /// Disarm the delete confirmation; no-op if nothing is pending.
    #[instrument(name = "user_directory.controller.cancel_delete", skip(self))]
    pub fn cancel_delete(&self) {
        if let Some(id) = self.session.lock().gate.cancel() {
            debug!(user_id = %id, "Delete cancelled");
        }
    }

    // --- read side ---

    pub fn phase(&self) -> Phase {
        let s = self.session.lock();
        match s.active_interaction() {
            Some(Interaction::Editing) => Phase::Editing,
            Some(Interaction::ConfirmingDelete) => Phase::ConfirmingDelete,
            None => match s.load_state {
                LoadState::Idle => Phase::Idle,
                LoadState::Loading => Phase::Loading,
                LoadState::Ready => Phase::Ready,
                LoadState::Error => Phase::Failed,
            },
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.session.lock().load_state
    }

    /// Message of the last failed refresh, cleared by the next successful one.
    pub fn last_error(&self) -> Option<String> {
        self.session.lock().last_error.clone()
    }

    /// Every loaded user in store order.
    pub fn records(&self) -> Vec<User> {
        self.session.lock().store.records().to_vec()
    }

    /// Users matching the current query, in store order.
    pub fn visible(&self) -> Vec<User> {
        let s = self.session.lock();
        filter::visible(s.store.records(), &s.query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn visible_ids(&self) -> Vec<String> {
        let s = self.session.lock();
        filter::visible(s.store.records(), &s.query)
            .into_iter()
            .map(|u| u.id.clone())
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<User> {
        self.session.lock().store.get(id).cloned()
    }

    pub fn query(&self) -> String {
        self.session.lock().query.clone()
    }

    /// Contents of the open form, if any.
    pub fn draft(&self) -> Option<UserDraft> {
        self.session.lock().draft.commit()
    }

    pub fn draft_origin(&self) -> Option<DraftOrigin> {
        self.session.lock().draft.origin().cloned()
    }

    pub fn pending_delete(&self) -> Option<String> {
        self.session.lock().gate.pending().cloned()
    }

    pub fn len(&self) -> usize {
        self.session.lock().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.session.lock().store.is_empty()
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    // --- validation helpers ---

    /// Role and name length are not checked: records loaded from the listing
    /// must round-trip through an edit unchanged.
    fn validate(&self, draft: &UserDraft) -> Result<(), DomainError> {
        self.validate_name(&draft.name)?;
        self.validate_email(&draft.email)?;
        Ok(())
    }

    fn validate_name(&self, name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<(), DomainError> {
        if email.trim().is_empty() {
            return Err(DomainError::validation("email", "must not be empty"));
        }
        if !email.contains('@') {
            return Err(DomainError::validation(
                "email",
                format!("'{email}' is missing '@'"),
            ));
        }
        Ok(())
    }
}

/// Log contract violations loudly before handing the error back.
fn surface(err: DomainError) -> DomainError {
    if err.is_contract_violation() {
        error!(error = %err, "Directory contract violation");
    }
    err
}
