use core_library::CatalogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    /// The history could not be obtained; nothing can be reconciled
    #[error("Failed to fetch listening history: {0}")]
    History(#[source] CatalogError),

    #[error("Reconciliation cancelled before completion")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
