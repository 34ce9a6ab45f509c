use async_trait::async_trait;

use crate::contract::model::{User, UserDraft};

/// Remote users API the console talks to.
///
/// Implementations own identity assignment for created users; the directory
/// controller only consumes the listing through a gateway.
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// List every user visible to the caller
    async fn list_users(&self) -> anyhow::Result<Vec<User>>;

    /// Create a user from a draft
    async fn create_user(&self, draft: UserDraft) -> anyhow::Result<User>;

    /// Replace the editable fields of a user
    async fn update_user(&self, id: &str, draft: UserDraft) -> anyhow::Result<User>;

    /// Delete a user by ID
    async fn delete_user(&self, id: &str) -> anyhow::Result<()>;
}
