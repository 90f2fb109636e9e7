pub mod behaviour;
pub mod config;
pub mod context;
pub mod types;
