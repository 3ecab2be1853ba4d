pub mod config;
pub mod notifier;
