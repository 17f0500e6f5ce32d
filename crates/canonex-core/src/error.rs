use thiserror::Error;

/// Validation and contract errors exposed by `canonex-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid exchange '{value}', expected one of bitvavo")]
    InvalidExchange { value: String },

    #[error("invalid http method '{value}', expected one of GET, POST, PUT, DELETE")]
    InvalidHttpMethod { value: String },
    #[error("invalid api scope '{value}', expected one of public, private")]
    InvalidScope { value: String },
    #[error("parameter must be formatted as key=value: '{value}'")]
    InvalidParam { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
    #[error("unix millisecond timestamp {value} is out of range")]
    TimestampOutOfRange { value: i64 },

    #[error("invalid code collision policy '{value}', expected one of reject, keep-first, keep-last")]
    InvalidCollisionPolicy { value: String },
}
