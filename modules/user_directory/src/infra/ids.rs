use uuid::Uuid;

use crate::domain::ports::IdGenerator;

/// Random v4 UUIDs rendered as hyphenated strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
