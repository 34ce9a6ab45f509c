pub mod ids;
pub mod synthetic;

pub use ids::UuidIdGenerator;
pub use synthetic::{demo_users, SyntheticUsersApi};
