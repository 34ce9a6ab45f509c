pub mod controller;
pub mod draft;
pub mod error;
pub mod events;
pub mod filter;
pub mod gate;
pub mod ports;
pub mod store;
