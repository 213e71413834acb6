//! Interactive search screen
//!
//! Search-as-you-type over a [`quicksearch_core::SearchPipeline`]:
//! - Input box feeding the debouncer on every edit
//! - Status line (idle, loading, error, result count)
//! - Current page of results with a windowed page strip
//!
//! The pipeline runs on the tokio runtime; the terminal loop runs on a
//! blocking thread and talks to it through a `PipelineHandle`.

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use terminal::run;
