use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{client::UsersApi, model::User};
use crate::domain::ports::ListingPort;

/// Listing collaborator backed by a users API client
pub struct UsersApiListing {
    api: Arc<dyn UsersApi>,
}

impl UsersApiListing {
    pub fn new(api: Arc<dyn UsersApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ListingPort for UsersApiListing {
    async fn fetch_resources(&self) -> anyhow::Result<Vec<User>> {
        self.api.list_users().await
    }
}
