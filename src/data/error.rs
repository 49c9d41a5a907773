use thiserror::Error;

/// Failures that reject an upload outright.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Unsupported file extension: .{0} (only .csv is accepted)")]
    UnsupportedExtension(String),

    #[error("CSV file has no header row")]
    MissingHeader,

    #[error("CSV row {row}: expected at most {expected} fields, found {found}")]
    TooManyFields {
        row: usize,
        expected: usize,
        found: usize,
    },
}
