/// The error type for database operations.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// A database error occurred.
    #[error("database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),
    /// A metadata value could not be parsed.
    #[error("invalid value {value} for metadata key {key}")]
    InvalidMetadata {
        /// The metadata key.
        key: &'static str,
        /// The persisted value.
        value: String,
    },
    /// A persisted batch hash has an unexpected length.
    #[error("invalid batch hash of length {0} for batch {1}")]
    InvalidBatchHash(usize, u64),
}
