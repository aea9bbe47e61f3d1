use std::io;

/// Error type, representing the errors which can be returned by the sdict library.
#[derive(Debug, thiserror::Error)]
pub enum SdictError {
    /// Signature mismatch, unknown codec id, or a monotonicity violation in the header.
    /// Fatal for `open`.
    #[error("invalid sdict file format: {0}")]
    FormatError(String),

    /// Decompression failure, a truncated record, or an out-of-range cursor read.
    /// Fatal for the offending unit only; the dictionary handle remains usable.
    #[error("corrupt sdict data: {0}")]
    CorruptionError(String),

    /// A wrapped `io::Error`.
    #[error("encountered an IO error")]
    IoError(#[from] io::Error),

    /// A code point read from a short index row at the given row index is not
    /// representable as a Unicode scalar value. Recovered locally by skipping the row.
    #[error("code point in short index row {0} is not a valid Unicode scalar value")]
    EncodingError(usize),

    /// Signalled when a caller aborts an iteration. Not an error in the usual sense,
    /// only used to distinguish abandonment from natural exhaustion.
    #[error("lookup was stopped by the caller")]
    LookupStopped,
}
