//! GradeGrip - a terminal UI for tallying course grades and computing a
//! weighted CGPA. The pure sheet/aggregation logic lives in gradegrip-core;
//! this crate supplies the TUI, configuration, and persistence adapters.

pub mod cli;
pub mod config;
pub mod store;
pub mod tui;
