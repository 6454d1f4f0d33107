//! Error types for the BR Code codec.

use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, PixError>;

/// Errors that can occur while building or decoding a payload.
#[derive(Error, Debug)]
pub enum PixError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Amount rejected by validation (non-positive or unparseable)
    #[error("Invalid amount {amount:?}: {reason}")]
    InvalidAmount { amount: String, reason: String },

    /// Merchant name or city empty after normalization
    #[error("Invalid merchant {field}: {reason}")]
    InvalidMerchant { field: &'static str, reason: String },

    /// Transaction ID outside the alphanumeric, 25-character contract
    #[error("Invalid transaction ID {txid:?}: {reason}")]
    InvalidTxid { txid: String, reason: String },

    /// A field value too long for a 2-digit TLV length header
    #[error("Field {id} value is {len} bytes, exceeding the 99-byte TLV limit")]
    FieldTooLong { id: String, len: usize },

    /// Payload string violates the TLV grammar
    #[error("Malformed payload at offset {offset}: {reason}")]
    MalformedPayload { offset: usize, reason: String },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: pix-brcode <charges.csv>")]
    MissingArgument,

    /// Merchant configuration environment variable not set
    #[error("Missing {var} environment variable")]
    MissingConfig { var: &'static str },
}
