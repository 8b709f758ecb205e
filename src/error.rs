//! Error types for header resolution, row reading and field binding

use std::num::ParseIntError;
use thiserror::Error;

/// Errors produced while building a [`Binder`](crate::Binder) or binding rows
#[derive(Debug, Error)]
pub enum BindError {
    /// The first row of the input was empty or missing
    #[error("missing header metadata")]
    NoHeaderMetadata,

    /// An explicit header was supplied but contained no columns
    #[error("missing custom header metadata")]
    NoCustomHeaderMetadata,

    /// The separator cannot be used as a single-byte delimiter
    #[error("separator {0:?} is not a single ASCII character")]
    InvalidSeparator(char),

    /// Time zone name not found in the IANA database
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),

    /// Tokenizer failure, surfaced unchanged
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Tokenizer failure while iterating, with the 1-based data row it happened on
    #[error("could not process row {row}: {source}")]
    RowRead {
        row: u64,
        #[source]
        source: csv::Error,
    },

    /// Strategy names a field the record does not declare
    #[error("unknown destination field: {0}")]
    UnknownDestinationField(String),

    #[error("invalid integer {value:?} for field {field}: {source}")]
    InvalidIntegerFormat {
        field: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid decimal {value:?} for field {field}: {source}")]
    InvalidDecimalFormat {
        field: String,
        value: String,
        #[source]
        source: bigdecimal::ParseBigDecimalError,
    },

    #[error("invalid timestamp {value:?} for field {field}: {source}")]
    InvalidTimestampFormat {
        field: String,
        value: String,
        #[source]
        source: TimestampError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Compressed input could not be opened or decompressed
    #[error("archive error: {0}")]
    Archive(String),
}

/// Why a timestamp cell was rejected
#[derive(Debug, Error)]
pub enum TimestampError {
    /// Not exactly `YYYY-MM-DD HH:MM:SS`
    #[error("expected layout YYYY-MM-DD HH:MM:SS")]
    Layout,

    /// Right shape but not a real date or time
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

/// Result type for csvbind operations
pub type Result<T> = std::result::Result<T, BindError>;
