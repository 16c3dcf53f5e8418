use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("row not found in {table}")]
    NotFound { table: String },

    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("store returned no rows for insert into {table}")]
    EmptyInsert { table: String },

    /// The row was written; only the store's copy of it could not be read.
    #[error("insert into {table} succeeded but the returned row is unreadable: {source}")]
    UnreadableInsert {
        table: String,
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store config error: {0}")]
    Config(String),
}

impl StoreError {
    /// Whether the write this error came from reached the store anyway.
    pub fn write_committed(&self) -> bool {
        matches!(self, StoreError::UnreadableInsert { .. })
    }
}
