pub mod file_store;
pub mod overlay;
pub mod repositories;
pub mod store;

pub use file_store::FileStore;
pub use repositories::StateRepository;
pub use store::{DocumentStore, MemoryStore};
