use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::api::{BookRecord, BookRecordId, NewBookRecord};
use crate::library_repository::{LibraryRepository, LibraryRepositoryError};

#[derive(Default)]
pub struct InMemoryLibraryRepository {
    record_sequence_generator: AtomicI32,
    records: parking_lot::RwLock<HashMap<BookRecordId, BookRecord>>,
}

#[async_trait::async_trait]
impl LibraryRepository for InMemoryLibraryRepository {
    async fn add_book(
        &self,
        owner: &str,
        book: NewBookRecord,
    ) -> Result<BookRecordId, LibraryRepositoryError> {
        let id = self
            .record_sequence_generator
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| next.checked_add(1))
            .map_err(|_| LibraryRepositoryError::Other("Book record ids exhausted".into()))?;
        self.records.write().insert(
            id,
            BookRecord {
                id,
                owner: owner.to_string(),
                title: book.title,
                author: book.author,
            },
        );
        Ok(id)
    }

    async fn list_books(&self, owner: &str) -> Result<Vec<BookRecord>, LibraryRepositoryError> {
        Ok(self
            .records
            .read()
            .values()
            .filter(|record| record.owner == owner)
            .cloned()
            .collect())
    }

    async fn delete_book(
        &self,
        owner: &str,
        id: BookRecordId,
    ) -> Result<bool, LibraryRepositoryError> {
        let mut records_lock = self.records.write();

        match records_lock.entry(id) {
            Entry::Occupied(occupied) if occupied.get().owner == owner => {
                occupied.remove();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
