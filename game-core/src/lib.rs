pub mod clock;
pub mod config;
pub mod engine;
pub mod game_events;
pub mod scoring;
pub mod selection;
pub mod tracker;
pub mod word_list;

// Re-export main components
pub use clock::*;
pub use config::*;
pub use engine::*;
pub use game_events::*;
pub use scoring::*;
pub use selection::*;
pub use tracker::*;
pub use word_list::*;
