//! quicksearch-omdb - OMDb title search as a quicksearch data source
//!
//! ## Architecture
//!
//! ```text
//! Query ─▶ OmdbClient::search (DataSource) ─▶ GET ?apikey=..&s=<term>
//!                 │                                   │
//!          CancellationToken                 parse_search_response
//!                                            ├─ Response "True"  → items
//!                                            ├─ Response "False" → domain error
//!                                            └─ not OMDb JSON    → transport error
//! ```

pub mod client;

pub use client::{decode_response, parse_search_response, MovieSummary, OmdbClient, DEFAULT_BASE_URL};

/// Load `.env` files from the standard locations (~/.quicksearch/.env, then cwd).
///
/// Variables already set in the process environment win.
pub fn load_env() {
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".quicksearch/.env"));
    }
    let _ = dotenvy::dotenv();
}
