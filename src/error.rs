use thiserror::Error;

/// Result type for migration operations
pub type MigrationResult<T> = Result<T, MigrationError>;

/// Error types for dashboard migration
#[derive(Error, Debug)]
pub enum MigrationError {
    /// The document text is not valid JSON. Fatal for that document only;
    /// the batch continues with the next one.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Reading, writing or enumerating dashboard files failed.
    #[error("File error: {0}")]
    File(String),

    /// A rewrite rule's pattern failed to compile.
    #[error("Invalid rewrite rule: {0}")]
    InvalidRule(String),

    /// Re-serializing the migrated document failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}
