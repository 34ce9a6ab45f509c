pub mod client;
pub mod model;

pub use client::UsersApi;
pub use model::{User, UserDraft, UserField, UserStatus};
