/// Errors raised by the collaborators behind the store and catalog ports.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    #[error("repository.database_error")]
    DatabaseError,
    #[error("repository.corrupted_record")]
    CorruptedRecord,
}

impl RepositoryError {
    pub fn not_found() -> Self {
        RepositoryError::NotFound
    }
    pub fn database_error() -> Self {
        RepositoryError::DatabaseError
    }
    pub fn corrupted_record() -> Self {
        RepositoryError::CorruptedRecord
    }
}
