//! Single-task driver wiring the Debounce Scheduler, Request Controller,
//! and Result Store.
//!
//! ```text
//! on_input_change ─▶ Debouncer ─▶ RequestController ─▶ ResultStore ─▶ watch<SearchView>
//!                       (D)        (cancel + spawn)      (+ Paginator)
//! ```
//!
//! Input events, debounce expiry, and request completions are all handled
//! by one `select!` loop, in arrival order. Source calls run elsewhere and
//! can only send a completion message back.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::controller::{Completion, RequestController};
use crate::debounce::{Debouncer, Settled};
use crate::error::ConfigResult;
use crate::source::DataSource;
use crate::store::{ResultStore, SearchView};

/// Calls from the presentation layer into the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    InputChanged(String),
    GoToPage(usize),
    NextPage,
    PrevPage,
    Shutdown,
}

/// Cheap, cloneable handle for sending input and reading the latest view
#[derive(Debug, Clone)]
pub struct PipelineHandle {
    commands: mpsc::UnboundedSender<Command>,
    view: watch::Receiver<SearchView>,
}

impl PipelineHandle {
    pub fn on_input_change(&self, value: impl Into<String>) {
        self.send(Command::InputChanged(value.into()));
    }

    /// Out-of-range pages are ignored by the pipeline
    pub fn on_page_request(&self, page: usize) {
        self.send(Command::GoToPage(page));
    }

    pub fn next_page(&self) {
        self.send(Command::NextPage);
    }

    pub fn prev_page(&self) {
        self.send(Command::PrevPage);
    }

    /// Latest published view
    pub fn view(&self) -> SearchView {
        self.view.borrow().clone()
    }

    /// A receiver that is notified on every published change
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            debug!("search pipeline already stopped");
        }
    }
}

/// A running search pipeline
pub struct SearchPipeline {
    handle: PipelineHandle,
    task: JoinHandle<()>,
}

impl SearchPipeline {
    /// Validate `config` and start the driver task on the current runtime.
    pub fn spawn(config: &SearchConfig, source: Arc<dyn DataSource>) -> ConfigResult<Self> {
        config.validate()?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let store =
            ResultStore::new(config.page_size_nonzero()?).with_max_page_links(config.max_page_links);
        let (view_tx, view_rx) = watch::channel(store.view());

        info!(
            debounce_ms = config.debounce_ms,
            page_size = config.page_size,
            source = source.name(),
            "search pipeline started"
        );

        let driver = Driver {
            debouncer: Debouncer::new(config.debounce()),
            controller: RequestController::new(source, completion_tx),
            store,
            commands: command_rx,
            completions: completion_rx,
            views: view_tx,
        };
        let task = tokio::spawn(driver.run());

        Ok(Self {
            handle: PipelineHandle {
                commands: command_tx,
                view: view_rx,
            },
            task,
        })
    }

    pub fn handle(&self) -> PipelineHandle {
        self.handle.clone()
    }

    pub fn on_input_change(&self, value: impl Into<String>) {
        self.handle.on_input_change(value);
    }

    pub fn on_page_request(&self, page: usize) {
        self.handle.on_page_request(page);
    }

    pub fn next_page(&self) {
        self.handle.next_page();
    }

    pub fn prev_page(&self) {
        self.handle.prev_page();
    }

    pub fn view(&self) -> SearchView {
        self.handle.view()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.handle.subscribe()
    }

    /// Stop the driver, cancelling any pending input and live request.
    pub async fn shutdown(self) {
        self.handle.send(Command::Shutdown);
        if let Err(err) = self.task.await {
            if !err.is_cancelled() {
                tracing::error!(error = %err, "search pipeline task panicked");
            }
        }
    }
}

struct Driver {
    debouncer: Debouncer,
    controller: RequestController,
    store: ResultStore,
    commands: mpsc::UnboundedReceiver<Command>,
    completions: mpsc::UnboundedReceiver<Completion>,
    views: watch::Sender<SearchView>,
}

impl Driver {
    async fn run(mut self) {
        loop {
            tokio::select! {
                // Input first: a keystroke arriving with an expiring timer restarts it
                biased;

                command = self.commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.on_command(command),
                },
                Some(completion) = self.completions.recv() => {
                    if self.controller.complete(completion, &mut self.store).is_some() {
                        self.publish();
                    }
                }
                settled = self.debouncer.settled() => self.on_settled(settled),
            }
        }

        self.debouncer.cancel();
        self.controller.shutdown();
        info!("search pipeline stopped");
    }

    fn on_command(&mut self, command: Command) {
        let changed = match command {
            Command::InputChanged(value) => {
                self.debouncer.push(value);
                false
            }
            Command::GoToPage(page) => self.store.go_to(page),
            Command::NextPage => self.store.next_page(),
            Command::PrevPage => self.store.prev_page(),
            Command::Shutdown => false,
        };
        if changed {
            self.publish();
        }
    }

    fn on_settled(&mut self, settled: Settled) {
        match settled {
            Settled::Query(query) => {
                self.controller.submit(query, &mut self.store);
            }
            Settled::Blank => {
                debug!("blank input, returning to idle");
                self.controller.cancel();
                self.store.clear();
            }
        }
        self.publish();
    }

    fn publish(&self) {
        self.views.send_replace(self.store.view());
    }
}
