pub mod commands;
pub mod aggregate;

// Re-exports
pub use commands::*;
pub use aggregate::*;
