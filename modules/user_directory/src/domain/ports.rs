use async_trait::async_trait;

use crate::contract::model::User;

/// Source of the full user listing used by `refresh`.
#[async_trait]
pub trait ListingPort: Send + Sync {
    async fn fetch_resources(&self) -> anyhow::Result<Vec<User>>;
}

/// Identity generator for newly created users.
///
/// Ids must never repeat for the lifetime of the process.
pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> String;
}

/// Output port: publish domain events (no knowledge of transport).
pub trait EventPublisher<E>: Send + Sync + 'static {
    fn publish(&self, event: &E);
}

/// Publisher that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

impl<E> EventPublisher<E> for NoopPublisher {
    fn publish(&self, _event: &E) {}
}
