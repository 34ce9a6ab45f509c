use chrono::{DateTime, Utc};

/// Transport-agnostic directory event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEvent {
    Loaded { count: usize, at: DateTime<Utc> },
    Created { id: String, at: DateTime<Utc> },
    Updated { id: String, at: DateTime<Utc> },
    Deleted { id: String, at: DateTime<Utc> },
}
