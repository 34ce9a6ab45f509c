#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

use user_directory::contract::model::{User, UserStatus};
use user_directory::domain::events::DirectoryEvent;
use user_directory::domain::ports::{EventPublisher, IdGenerator, ListingPort};
use user_directory::{DirectoryConfig, DirectoryController};

pub type FetchResult = anyhow::Result<Vec<User>>;

enum Step {
    Respond(FetchResult),
    Wait(oneshot::Receiver<FetchResult>),
}

/// Listing that answers each fetch with the next scripted step.
#[derive(Default)]
pub struct ScriptedListing {
    steps: Mutex<VecDeque<Step>>,
    calls: AtomicUsize,
}

impl ScriptedListing {
    pub fn push_ok(&self, users: Vec<User>) {
        self.steps.lock().push_back(Step::Respond(Ok(users)));
    }

    pub fn push_err(&self, message: &str) {
        self.steps
            .lock()
            .push_back(Step::Respond(Err(anyhow!(message.to_string()))));
    }

    /// The matching fetch suspends until the returned sender fires.
    pub fn push_gate(&self) -> oneshot::Sender<FetchResult> {
        let (tx, rx) = oneshot::channel();
        self.steps.lock().push_back(Step::Wait(rx));
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Yield until `n` fetches have started.
    pub async fn wait_for_calls(&self, n: usize) {
        while self.calls() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl ListingPort for ScriptedListing {
    async fn fetch_resources(&self) -> FetchResult {
        let step = self.steps.lock().pop_front();
        self.calls.fetch_add(1, Ordering::SeqCst);
        match step {
            Some(Step::Respond(result)) => result,
            Some(Step::Wait(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(anyhow!("gate dropped without a response"))),
            None => Err(anyhow!("no scripted response left")),
        }
    }
}

/// Deterministic ids: "new-1", "new-2", ...
#[derive(Default)]
pub struct SeqIds(AtomicU64);

impl IdGenerator for SeqIds {
    fn new_id(&self) -> String {
        format!("new-{}", self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Always returns the same id; only useful to provoke collisions.
pub struct FixedId(pub &'static str);

impl IdGenerator for FixedId {
    fn new_id(&self) -> String {
        self.0.to_string()
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<DirectoryEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<DirectoryEvent> {
        self.events.lock().clone()
    }
}

impl EventPublisher<DirectoryEvent> for RecordingPublisher {
    fn publish(&self, event: &DirectoryEvent) {
        self.events.lock().push(event.clone());
    }
}

pub struct Harness {
    pub ctl: Arc<DirectoryController>,
    pub listing: Arc<ScriptedListing>,
    pub events: Arc<RecordingPublisher>,
}

pub fn harness() -> Harness {
    harness_with(Arc::new(SeqIds::default()), DirectoryConfig::default())
}

pub fn harness_with(ids: Arc<dyn IdGenerator>, config: DirectoryConfig) -> Harness {
    let listing = Arc::new(ScriptedListing::default());
    let events = Arc::new(RecordingPublisher::default());
    let ctl = Arc::new(DirectoryController::new(
        listing.clone(),
        ids,
        events.clone(),
        config,
    ));
    Harness {
        ctl,
        listing,
        events,
    }
}

/// Harness whose store already holds `users`.
pub async fn loaded(users: Vec<User>) -> Harness {
    let h = harness();
    h.listing.push_ok(users);
    h.ctl.refresh().await.expect("initial refresh");
    h
}

pub fn user(id: &str, name: &str, email: &str, role: &str, last_login: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        status: UserStatus::Active,
        last_login: last_login.to_string(),
    }
}

pub fn john_doe() -> User {
    user("1", "John Doe", "john@x.com", "admin", "t1")
}

pub fn jane_smith() -> User {
    user("2", "Jane Smith", "jane.smith@example.com", "manager", "t2")
}

pub fn ids(users: &[User]) -> Vec<String> {
    users.iter().map(|u| u.id.clone()).collect()
}
