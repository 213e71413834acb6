//! Domain types shared by every stage of the search pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A settled search input.
///
/// Holds the raw text exactly as typed. Blank input never becomes a `Query`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Accept raw input as a query, or `None` if it is blank after trimming.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of a result set, in the source's relevance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Stable unique identifier from the source
    pub id: String,
    /// Primary display text
    pub title: String,
    /// Secondary display text (e.g. release year)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Short tag rendered next to the title (e.g. "movie")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl ResultItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            badge: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }
}

/// What the result area should show.
///
/// A single tag, so "loading" and "error" can never be true at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum Status {
    /// Nothing searched yet, or the input was cleared
    Idle,
    /// A request is in flight
    Loading,
    /// The source answered with zero items
    Empty,
    /// The source or transport failed; carries the message to show
    Error(String),
    /// Items are available
    Populated,
}

impl Status {
    /// Message to display alongside this status, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Status::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Status::Loading)
    }

    /// Short label for status lines and logs
    pub fn label(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Loading => "loading",
            Status::Empty => "empty",
            Status::Error(_) => "error",
            Status::Populated => "populated",
        }
    }
}
