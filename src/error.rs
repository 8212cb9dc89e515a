use thiserror::Error;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("operation {0} not found")]
    OperationNotFound(u64),

    #[error("journal entry {0} not found")]
    EntryNotFound(u64),

    #[error("operation id {0} is already in use")]
    DuplicateOperationId(u64),

    #[error("journal entry id {0} is already in use")]
    DuplicateEntryId(u64),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("operation {operation_id:?} references unknown asset '{symbol}'")]
    UnknownAsset {
        symbol: String,
        operation_id: Option<u64>,
    },

    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("report is empty or has no data rows")]
    Empty,

    #[error("report does not look like a MetaTrader 5 export")]
    NotMt5Report,

    #[error("line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
