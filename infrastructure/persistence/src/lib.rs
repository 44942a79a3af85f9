pub mod db;
pub mod cart {
    pub mod entity;
    pub mod store;
}
pub mod catalog {
    pub mod entity;
    pub mod repository;
}

use business::domain::errors::RepositoryError;

/// Logs the driver error and hides it behind the domain error.
pub(crate) fn database_error(err: sqlx::Error) -> RepositoryError {
    tracing::error!(target: "persistence", "database error: {err}");
    RepositoryError::database_error()
}
