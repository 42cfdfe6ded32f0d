pub mod course;
pub mod scale;
pub mod events;

// Re-exports for convenience
pub use course::*;
pub use scale::*;
pub use events::*;
