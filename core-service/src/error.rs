use bridge_traits::error::BridgeError;
use core_reconcile::ReconcileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Core initialization failed: {0}")]
    InitializationFailed(#[from] BridgeError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

impl CoreError {
    /// True when the run stopped because its cancellation token fired
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CoreError::Reconcile(ReconcileError::Cancelled))
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
