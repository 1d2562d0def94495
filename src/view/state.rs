//! View-state controller.
//!
//! [`ViewController`] owns the chart's [`ViewState`] and is the only thing
//! that mutates it. Every transition is a plain method call that performs no
//! I/O: actions return the [`FetchRequest`] the caller should run, and the
//! caller hands the outcome back as a [`FetchCompletion`].
//!
//! Each request is tagged with the window it was issued for and a
//! monotonically increasing id. A completion only reaches the visible state
//! if its window is still the selected one, so the last selection wins no
//! matter in which order responses arrive. Among completions for the selected
//! window, the most recently completed one is shown.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::FetchError;
use crate::plant_api::{Reading, WindowSelector};

/// Snapshot of everything the renderer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub selector: WindowSelector,
    /// Last successfully fetched readings, in service order.
    pub readings: Arc<Vec<Reading>>,
    pub is_loading: bool,
    /// Message of the last failed fetch for the current window.
    pub notice: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selector: WindowSelector::default(),
            readings: Arc::new(Vec::new()),
            is_loading: false,
            notice: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
}

impl ViewState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else {
            Phase::Idle
        }
    }
}

/// A fetch the controller wants run, tagged with its originating window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: u64,
    pub selector: WindowSelector,
}

#[derive(Debug)]
pub struct FetchCompletion {
    pub request: FetchRequest,
    pub result: Result<Vec<Reading>, FetchError>,
}

/// What happened to a completion.
#[derive(Debug)]
pub enum Reconciliation {
    /// Readings replaced.
    Applied { count: usize },
    /// Fetch failed; previous readings kept.
    Failed(FetchError),
    /// The window changed while the request was in flight.
    Stale { current: WindowSelector },
}

#[derive(Debug, Default)]
pub struct ViewController {
    state: ViewState,
    pending: BTreeMap<u64, WindowSelector>,
    next_request_id: u64,
}

impl ViewController {
    /// Controller in `Idle(All, [])`. Call [`Self::start`] to issue the
    /// initial fetch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Number of requests issued but not yet completed.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Startup fetch; equivalent to a refresh of the default window.
    pub fn start(&mut self) -> FetchRequest {
        self.refresh()
    }

    /// Switch windows. Selecting the current window does nothing.
    pub fn select_window(&mut self, selector: WindowSelector) -> Option<FetchRequest> {
        if selector == self.state.selector {
            return None;
        }
        self.state.selector = selector;
        self.state.notice = None;
        Some(self.issue())
    }

    /// Re-fetch the current window, whether or not a fetch is already running.
    pub fn refresh(&mut self) -> FetchRequest {
        self.issue()
    }

    pub fn complete(&mut self, completion: FetchCompletion) -> Reconciliation {
        let FetchCompletion { request, result } = completion;
        self.pending.remove(&request.id);

        let outcome = if request.selector != self.state.selector {
            Reconciliation::Stale {
                current: self.state.selector,
            }
        } else {
            match result {
                Ok(readings) => {
                    let count = readings.len();
                    self.state.readings = Arc::new(readings);
                    self.state.notice = None;
                    Reconciliation::Applied { count }
                }
                Err(e) => {
                    self.state.notice = Some(e.to_string());
                    Reconciliation::Failed(e)
                }
            }
        };

        self.sync_loading();
        outcome
    }

    fn issue(&mut self) -> FetchRequest {
        let request = FetchRequest {
            id: self.next_request_id,
            selector: self.state.selector,
        };
        self.next_request_id += 1;
        self.pending.insert(request.id, request.selector);
        self.sync_loading();
        request
    }

    // Loading while any request for the selected window is outstanding.
    fn sync_loading(&mut self) {
        let selector = self.state.selector;
        self.state.is_loading = self.pending.values().any(|s| *s == selector);
    }
}
