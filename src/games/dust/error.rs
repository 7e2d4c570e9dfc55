//! Error types for the dust economy and its save adapter.
//!
//! Both kinds are recoverable: the caller turns them into a notice and the
//! game keeps running with the state it had before the failed operation.

/// Failure of a player action or of the persistence adapter.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A guarded debit could not be paid.
    #[error("not enough {currency}: need {needed:.0}, have {available:.0}")]
    InsufficientFunds {
        currency: &'static str,
        needed: f64,
        available: f64,
    },

    /// Reading or writing the save blob failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Why the save blob could not be read or written.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// No storage backend is reachable (e.g. localStorage disabled).
    #[error("storage is unavailable")]
    Unavailable,

    /// The backend refused the operation (quota exceeded, access denied).
    #[error("storage rejected the {op}: {reason}")]
    Rejected { op: &'static str, reason: String },

    /// The blob is not valid JSON for the save format.
    #[error("save data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl GameError {
    pub fn insufficient(currency: &'static str, needed: f64, available: f64) -> Self {
        GameError::InsufficientFunds {
            currency,
            needed,
            available,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Persistence(PersistenceError::Corrupt(e))
    }
}
