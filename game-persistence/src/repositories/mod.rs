pub mod state_repository;

pub use state_repository::*;
