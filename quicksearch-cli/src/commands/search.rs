//! One-shot search: issue a single query (no debounce) and print one page.

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use quicksearch_core::{
    CancellationToken, DataSource, PageLink, Query, ResultStore, SearchConfig, SearchView, Status,
};
use quicksearch_omdb::OmdbClient;
use serde::Serialize;
use tracing::{instrument, warn};

use crate::ui;

/// Search subcommand arguments
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query (title keywords)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Page of results to print (1-indexed)
    #[arg(long, short = 'p', default_value = "1")]
    pub page: usize,

    /// Output format (text, json)
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// JSON for machine consumption
    Json,
}

#[instrument(skip_all, fields(page = args.page))]
pub async fn run_search(args: &SearchArgs, config: &SearchConfig) -> Result<()> {
    let Some(query) = Query::parse(args.query.as_str()) else {
        bail!("No query provided. Pass a non-blank QUERY argument.");
    };

    let client = OmdbClient::from_env()?;
    let mut store = ResultStore::new(config.page_size_nonzero()?)
        .with_max_page_links(config.max_page_links);

    let pb = ui::spinner(format!("Searching for \"{}\"...", query));
    let cancel = CancellationToken::new();
    let outcome = tokio::select! {
        outcome = client.search(&query, cancel.clone()) => outcome,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            ui::finish(pb);
            bail!("Search interrupted");
        }
    };
    ui::finish(pb);
    store.apply(outcome);

    if !store.go_to(args.page) {
        warn!(
            requested = args.page,
            total_pages = store.total_pages(),
            "page out of range, showing page {}",
            store.page()
        );
    }

    let view = store.view();
    match args.format {
        OutputFormat::Json => println!("{}", format_json(&query, &view)?),
        OutputFormat::Text => print!("{}", format_text(&query, &view)),
    }

    Ok(())
}

/// Render a view as a plain listing
pub fn format_text(query: &Query, view: &SearchView) -> String {
    let mut output = String::new();

    match &view.status {
        Status::Error(message) => {
            output.push_str(&format!("{}\n", message));
            return output;
        }
        Status::Empty => {
            output.push_str(&format!("No results for \"{}\".\n", query));
            return output;
        }
        Status::Idle | Status::Loading => return output,
        Status::Populated => {}
    }

    output.push_str(&format!(
        "Results for \"{}\" ({} total), page {} of {}\n\n",
        query, view.total_items, view.page, view.total_pages
    ));

    for (offset, item) in view.items.iter().enumerate() {
        output.push_str(&format!("{:>3}. {}", view.first_index + offset + 1, item.title));
        if let Some(year) = &item.subtitle {
            output.push_str(&format!(" ({})", year));
        }
        if let Some(kind) = &item.badge {
            output.push_str(&format!(" [{}]", kind));
        }
        output.push_str(&format!("  {}\n", item.id));
    }

    if view.has_multiple_pages() {
        output.push_str(&format!("\nPages: {}\n", format_page_links(&view.page_links, view.page)));
    }

    output
}

/// `1 2 [3] 4 … 20`
pub fn format_page_links(links: &[PageLink], current: usize) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Page(p) if *p == current => format!("[{}]", p),
            PageLink::Page(p) => p.to_string(),
            PageLink::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_json(query: &Query, view: &SearchView) -> Result<String> {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        query: &'a str,
        #[serde(flatten)]
        view: &'a SearchView,
    }
    let output = JsonOutput {
        query: query.as_str(),
        view,
    };
    serde_json::to_string_pretty(&output).context("Failed to serialize to JSON")
}
