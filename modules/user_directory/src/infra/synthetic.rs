use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::DirectoryConfig;
use crate::contract::{
    client::UsersApi,
    model::{User, UserDraft, UserStatus},
};
use crate::domain::ports::IdGenerator;
use crate::infra::ids::UuidIdGenerator;

/// In-memory users API with optional simulated latency.
///
/// Stands in for the remote service; everything is lost when it is dropped.
/// The console only lists through it. Writes are served for other callers
/// of `UsersApi` and stamp new users with the configured never-logged-in value.
pub struct SyntheticUsersApi {
    users: Mutex<Vec<User>>,
    ids: Arc<dyn IdGenerator>,
    latency: Duration,
    never_logged_in: String,
}

impl SyntheticUsersApi {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            ids: Arc::new(UuidIdGenerator),
            latency: Duration::ZERO,
            never_logged_in: DirectoryConfig::default().never_logged_in,
        }
    }

    /// Seeded with the five demo accounts of the admin dashboard.
    pub fn demo() -> Self {
        Self::new(demo_users())
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[must_use]
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Take the new-user login stamp from the directory config.
    #[must_use]
    pub fn with_config(mut self, config: &DirectoryConfig) -> Self {
        self.never_logged_in = config.never_logged_in.clone();
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl UsersApi for SyntheticUsersApi {
    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        self.simulate_latency().await;
        let users = self.users.lock().clone();
        debug!(count = users.len(), "Synthetic listing served");
        Ok(users)
    }

    async fn create_user(&self, draft: UserDraft) -> anyhow::Result<User> {
        self.simulate_latency().await;
        let user = User::from_draft(self.ids.new_id(), draft, self.never_logged_in.clone());
        let mut users = self.users.lock();
        if users.iter().any(|u| u.id == user.id) {
            return Err(anyhow!("user id '{}' already exists", user.id));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: &str, draft: UserDraft) -> anyhow::Result<User> {
        self.simulate_latency().await;
        let mut users = self.users.lock();
        let slot = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| anyhow!("user '{id}' not found"))?;
        *slot = User::from_draft(slot.id.clone(), draft, slot.last_login.clone());
        Ok(slot.clone())
    }

    async fn delete_user(&self, id: &str) -> anyhow::Result<()> {
        self.simulate_latency().await;
        let mut users = self.users.lock();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(anyhow!("user '{id}' not found"));
        }
        Ok(())
    }
}

/// The demo accounts shown by the dashboard before any backend exists.
pub fn demo_users() -> Vec<User> {
    use UserStatus::{Active, Inactive};
    [
        ("1", "John Doe", "admin", Active, "2023-06-15 10:30 AM"),
        ("2", "Jane Smith", "manager", Active, "2023-06-14 02:45 PM"),
        ("3", "Robert Johnson", "user", Inactive, "2023-05-30 09:15 AM"),
        ("4", "Emily Davis", "user", Active, "2023-06-15 08:20 AM"),
        ("5", "Michael Brown", "manager", Active, "2023-06-14 11:05 AM"),
    ]
    .into_iter()
    .map(|(id, name, role, status, last_login)| User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        role: role.to_string(),
        status,
        last_login: last_login.to_string(),
    })
    .collect()
}
