use anyhow::Context;
use tokio_postgres::{Client, NoTls, Statement};

use crate::api::{BookRecord, BookRecordId, NewBookRecord};
use crate::library_repository::{LibraryRepository, LibraryRepositoryError};

pub struct PostgresLibraryRepository {
    client: Client,
}

pub struct PostgresLibraryRepositoryConfig {
    pub hostname: String,
    pub username: String,
    pub password: String,
}

impl PostgresLibraryRepository {
    pub async fn init(config: PostgresLibraryRepositoryConfig) -> anyhow::Result<Self> {
        let connection_str = format!(
            "postgresql://{}:{}@{}",
            config.username, config.password, config.hostname
        );
        tracing::info!(
            "Postgres connection to {} as {}",
            config.hostname,
            config.username
        );
        let (client, connection) = tokio_postgres::connect(&connection_str, NoTls)
            .await
            .context("Failed to start postgres")?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("Postgres connection error: {}", e);
            }
        });

        client
            .batch_execute(
                "
        CREATE TABLE IF NOT EXISTS library_books (
            id              SERIAL PRIMARY KEY,
            owner           TEXT NOT NULL,
            title           TEXT NOT NULL,
            author          TEXT NOT NULL
            );
        CREATE INDEX IF NOT EXISTS library_books_owner_idx ON library_books (owner);
        ",
            )
            .await
            .context("Failed to setup library_books table")?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl LibraryRepository for PostgresLibraryRepository {
    async fn add_book(
        &self,
        owner: &str,
        book: NewBookRecord,
    ) -> Result<BookRecordId, LibraryRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("INSERT INTO library_books (owner, title, author) VALUES ($1, $2, $3) RETURNING id")
            .await?;

        let rows = self
            .client
            .query(&stmt, &[&owner, &book.title, &book.author])
            .await?;

        let id: BookRecordId = rows
            .first()
            .ok_or_else(|| LibraryRepositoryError::Other("Id not returned".to_string()))?
            .try_get(0)?;

        Ok(id)
    }

    async fn list_books(&self, owner: &str) -> Result<Vec<BookRecord>, LibraryRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("SELECT id, owner, title, author FROM library_books WHERE owner = $1")
            .await?;

        let rows = self.client.query(&stmt, &[&owner]).await?;

        rows.iter()
            .map(|row| {
                Ok(BookRecord {
                    id: row.try_get(0)?,
                    owner: row.try_get(1)?,
                    title: row.try_get(2)?,
                    author: row.try_get(3)?,
                })
            })
            .collect()
    }

    async fn delete_book(
        &self,
        owner: &str,
        id: BookRecordId,
    ) -> Result<bool, LibraryRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("DELETE FROM library_books WHERE id = $1 AND owner = $2")
            .await?;

        let deleted = self.client.execute(&stmt, &[&id, &owner]).await?;
        Ok(deleted > 0)
    }
}
