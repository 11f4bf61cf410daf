//! Orchestration services bridging ports and command definitions.

mod dispatcher;
mod reconciler;

pub use dispatcher::{DispatchError, DispatchReceipt, Dispatcher};
pub use reconciler::{ReconcileError, ReconcileOutcome, Reconciler};
