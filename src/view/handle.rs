use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

use crate::plant_api::{Reading, WindowSelector};
use crate::view::runtime::{Action, Command};
use crate::view::state::ViewState;

#[derive(Debug, thiserror::Error)]
#[error("View runtime is not running")]
pub struct ViewClosed;

/// Read-only access to the view state plus the two user actions.
///
/// Cheap to clone; every clone talks to the same runtime.
#[derive(Clone)]
pub struct ViewHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<ViewState>,
}

impl ViewHandle {
    pub(crate) fn new(commands: mpsc::Sender<Command>, snapshots: watch::Receiver<ViewState>) -> Self {
        Self {
            commands,
            snapshots,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewState {
        self.snapshots.borrow().clone()
    }

    #[must_use]
    pub fn selector(&self) -> WindowSelector {
        self.snapshots.borrow().selector
    }

    #[must_use]
    pub fn readings(&self) -> Arc<Vec<Reading>> {
        Arc::clone(&self.snapshots.borrow().readings)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.snapshots.borrow().is_loading
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.snapshots.clone()
    }

    /// Switch the chart to another window.
    ///
    /// Returns the state right after the transition, before any fetch it
    /// triggered has completed.
    ///
    /// # Errors
    ///
    /// Returns `ViewClosed` if the runtime has stopped.
    pub async fn select_window(&self, selector: WindowSelector) -> Result<ViewState, ViewClosed> {
        self.send(Action::SelectWindow(selector)).await
    }

    /// Re-fetch the current window.
    ///
    /// # Errors
    ///
    /// Returns `ViewClosed` if the runtime has stopped.
    pub async fn refresh(&self) -> Result<ViewState, ViewClosed> {
        self.send(Action::Refresh).await
    }

    /// Wait until the state satisfies `predicate` and return that state.
    ///
    /// # Errors
    ///
    /// Returns `ViewClosed` if the runtime stops first.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&ViewState) -> bool,
    ) -> Result<ViewState, ViewClosed> {
        let mut rx = self.snapshots.clone();
        let state = rx.wait_for(predicate).await.map_err(|_| ViewClosed)?;
        Ok(state.clone())
    }

    async fn send(&self, action: Action) -> Result<ViewState, ViewClosed> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command { action, reply })
            .await
            .map_err(|_| ViewClosed)?;
        response.await.map_err(|_| ViewClosed)
    }
}
