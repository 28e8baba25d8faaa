use std::fmt;
use thiserror::Error;

/// Which of the two independently queried stores an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Trader,
    Content,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Trader => write!(f, "trader"),
            StoreKind::Content => write!(f, "content"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BazaarError {
    #[error("Validation Error: {0}")]
    Validation(String),
    #[error("Store Error ({store}): {source}")]
    Store {
        store: StoreKind,
        #[source]
        source: sqlx::Error,
    },
    #[error("Enrichment Error: {0}")]
    Enrichment(String),
    #[error("The bazaar is disabled")]
    Disabled,
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Render Error: {0}")]
    Render(#[from] serde_json::Error),
}

impl BazaarError {
    pub fn validation(msg: impl Into<String>) -> Self {
        BazaarError::Validation(msg.into())
    }

    pub fn store(store: StoreKind) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| BazaarError::Store { store, source }
    }
}

pub type Result<T> = std::result::Result<T, BazaarError>;

/// Result of a raw store call, before the pipeline tags it with a store kind.
pub type StoreResult<T> = std::result::Result<T, sqlx::Error>;
