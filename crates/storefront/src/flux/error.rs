//! Flux layer errors.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FluxError {
    /// An action was dispatched while subscribers were being notified.
    /// Cascading dispatches are refused; the notified view must dispatch from
    /// a later user interaction instead.
    #[error("cannot dispatch {action} while notifying subscribers")]
    DispatchDuringNotification { action: &'static str },

    /// The stores are held by an ongoing read or notification pass.
    #[error("stores are busy")]
    StoresBusy,
}
