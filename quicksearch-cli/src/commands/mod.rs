//! Subcommand implementations

pub mod search;

pub use search::{run_search, SearchArgs};
