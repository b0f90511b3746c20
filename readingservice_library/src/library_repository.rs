pub use in_memory_library_repository::InMemoryLibraryRepository;
pub use postgres_library_repository::{
    PostgresLibraryRepository, PostgresLibraryRepositoryConfig,
};

use crate::api::{BookRecord, BookRecordId, NewBookRecord};

mod in_memory_library_repository;
mod postgres_library_repository;

#[derive(thiserror::Error, Debug)]
pub enum LibraryRepositoryError {
    #[error("DatabaseFailure failure {0}")]
    DatabaseFailure(#[from] tokio_postgres::Error),

    #[error("Other error {0}")]
    Other(String),
}

/// Personal book lists, partitioned by owner name
#[async_trait::async_trait]
pub trait LibraryRepository: Send + Sync {
    /// Adds book to the owner's list, returns an id assigned to the record
    async fn add_book(
        &self,
        owner: &str,
        book: NewBookRecord,
    ) -> Result<BookRecordId, LibraryRepositoryError>;

    /// Lists all records of the owner, in no particular order
    async fn list_books(&self, owner: &str) -> Result<Vec<BookRecord>, LibraryRepositoryError>;

    /// Deletes the record if it belongs to the owner.
    /// Returns true if a record was removed and false if nothing matched
    async fn delete_book(
        &self,
        owner: &str,
        id: BookRecordId,
    ) -> Result<bool, LibraryRepositoryError>;
}
