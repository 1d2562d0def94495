//! Chart view: the state machine behind the dashboard, the task that runs it,
//! and the handle the presentation layer reads and drives it through.

pub mod format;
pub mod handle;
pub mod runtime;
pub mod state;

pub use handle::{ViewClosed, ViewHandle};
pub use runtime::{Action, ViewRuntime};
pub use state::{FetchCompletion, FetchRequest, Phase, Reconciliation, ViewController, ViewState};
