pub mod errors;
pub mod game;
pub mod score;
pub mod session;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use score::*;
pub use session::*;
