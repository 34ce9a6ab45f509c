// === PUBLIC CONTRACT ===
pub mod contract;

// Re-export the public contract components
pub use contract::{client, model};

pub mod config;
pub use config::DirectoryConfig;

pub mod domain;
pub use domain::controller::{DirectoryController, RefreshOutcome};
pub use domain::error::DomainError;

// === ADAPTERS ===
pub mod gateways;
pub mod infra;
