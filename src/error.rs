//! Errors at the storage seam
//!
//! The simulation itself never fails; only the backends behind
//! `ScoreStore` and the settings file can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored contents could not be encoded or decoded
    #[error("store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No storage backend (e.g. LocalStorage disabled by the browser)
    #[error("storage backend unavailable")]
    Unavailable,
}
