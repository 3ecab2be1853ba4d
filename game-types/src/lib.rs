pub mod errors;
pub mod game;
pub mod progression;
pub mod vocab;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use progression::*;
pub use vocab::*;
