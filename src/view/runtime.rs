use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

use crate::plant_api::{EndpointResolver, ReadingSource, WindowSelector};
use crate::view::handle::ViewHandle;
use crate::view::state::{FetchCompletion, FetchRequest, Reconciliation, ViewController, ViewState};

/// Capacity of the action queue between the presentation layer and the runtime.
const ACTION_BUFFER: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectWindow(WindowSelector),
    Refresh,
}

/// An action plus the channel its post-transition state is reported on.
pub(crate) struct Command {
    pub(crate) action: Action,
    pub(crate) reply: oneshot::Sender<ViewState>,
}

/// Drives a [`ViewController`] from a single task.
///
/// Actions and fetch completions are handled one at a time on the same task,
/// so the controller never sees interleaved mutations. Fetches are polled
/// concurrently with the action queue but only touch the state once they
/// complete.
pub struct ViewRuntime<S> {
    controller: ViewController,
    source: Arc<S>,
    resolver: EndpointResolver,
    commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<ViewState>,
    startup: Option<FetchRequest>,
}

impl<S: ReadingSource> ViewRuntime<S> {
    /// Create a runtime and the handle used to observe and drive it.
    ///
    /// The startup fetch is issued here, so the handle reports a loading view
    /// from the start. The request itself is only sent once [`Self::run`] is
    /// polled.
    pub fn new(source: Arc<S>, resolver: EndpointResolver) -> (Self, ViewHandle) {
        let mut controller = ViewController::new();
        let startup = controller.start();
        let (command_tx, commands) = mpsc::channel(ACTION_BUFFER);
        let (snapshots, snapshot_rx) = watch::channel(controller.state().clone());

        let runtime = Self {
            controller,
            source,
            resolver,
            commands,
            snapshots,
            startup: Some(startup),
        };
        (runtime, ViewHandle::new(command_tx, snapshot_rx))
    }

    /// Send the startup fetch and process actions until every handle is dropped.
    ///
    /// Requests still in flight at that point are abandoned.
    pub async fn run(mut self) {
        let mut in_flight = FuturesUnordered::new();

        if let Some(request) = self.startup.take() {
            in_flight.push(self.run_fetch(request));
        }

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    let Some(Command { action, reply }) = command else {
                        tracing::debug!(in_flight = in_flight.len(), "View handles dropped, stopping runtime");
                        break;
                    };
                    if let Some(request) = self.apply(action) {
                        in_flight.push(self.run_fetch(request));
                    }
                    self.publish();
                    // The caller may have given up waiting; the transition stands.
                    let _ = reply.send(self.controller.state().clone());
                }
                Some(completion) = in_flight.next(), if !in_flight.is_empty() => {
                    self.reconcile(completion);
                    self.publish();
                }
            }
        }
    }

    fn apply(&mut self, action: Action) -> Option<FetchRequest> {
        match action {
            Action::SelectWindow(selector) => {
                let request = self.controller.select_window(selector);
                if request.is_none() {
                    tracing::debug!(selector = %selector, "Window already selected");
                }
                request
            }
            Action::Refresh => Some(self.controller.refresh()),
        }
    }

    fn run_fetch(
        &self,
        request: FetchRequest,
    ) -> impl Future<Output = FetchCompletion> + Send + use<S> {
        let source = Arc::clone(&self.source);
        let address = self.resolver.resolve(request.selector);
        tracing::info!(
            request_id = request.id,
            selector = %request.selector,
            url = %address,
            "Fetching readings"
        );

        async move {
            let result = source.fetch(&address).await;
            FetchCompletion { request, result }
        }
    }

    fn reconcile(&mut self, completion: FetchCompletion) {
        let request = completion.request;

        match self.controller.complete(completion) {
            Reconciliation::Applied { count } => {
                tracing::info!(
                    request_id = request.id,
                    selector = %request.selector,
                    count,
                    "Readings updated"
                );
            }
            Reconciliation::Failed(e) => {
                tracing::warn!(
                    request_id = request.id,
                    selector = %request.selector,
                    kind = ?e.kind(),
                    error = %e,
                    "Fetch failed, keeping previous readings"
                );
            }
            Reconciliation::Stale { current } => {
                tracing::debug!(
                    request_id = request.id,
                    selector = %request.selector,
                    current = %current,
                    "Discarding response for abandoned window"
                );
            }
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.controller.state().clone());
    }
}
