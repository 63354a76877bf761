//! SQLite-backed FAQ cache.
//!
//! A single `duvidas` table holds the scraped question/answer pairs:
//!
//! ```sql
//! CREATE TABLE duvidas (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     pergunta TEXT NOT NULL,
//!     resposta TEXT NOT NULL
//! )
//! ```
//!
//! Every operation opens its own connection and closes it before returning;
//! there is no pool and no persistent handle. `replace_all` runs the delete
//! plus the insert batch inside one transaction, so a refresh commits as a
//! single unit.

use askbot_core::error::StoreError;
use askbot_core::faq::QaPair;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, Row, SqliteConnection};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The SQLite FAQ cache.
pub struct SqliteFaqStore {
    options: SqliteConnectOptions,
    path: PathBuf,
}

impl SqliteFaqStore {
    /// Create a store handle for the given database file.
    ///
    /// The file is created on first use; call [`initialize`](Self::initialize)
    /// before anything else.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        Self { options, path }
    }

    /// The database file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn connect(&self) -> Result<SqliteConnection, StoreError> {
        self.options.connect().await.map_err(|e| {
            StoreError::Storage(format!(
                "failed to open SQLite at {}: {e}",
                self.path.display()
            ))
        })
    }

    /// Ensure the `duvidas` table exists. Idempotent.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        let mut conn = self.connect().await?;
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS duvidas (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                pergunta TEXT NOT NULL,
                resposta TEXT NOT NULL
            )
            "#,
        )
        .execute(&mut conn)
        .await
        .map_err(|e| StoreError::MigrationFailed(format!("duvidas table: {e}")))?;

        conn.close().await.ok();
        debug!(path = %self.path.display(), "FAQ store initialized");
        Ok(())
    }

    /// Load every stored pair in insertion order.
    ///
    /// An empty result is a valid, expected state, not an error.
    pub async fn load_all(&self) -> Result<Vec<QaPair>, StoreError> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query("SELECT pergunta, resposta FROM duvidas ORDER BY id")
            .fetch_all(&mut conn)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("SELECT duvidas: {e}")))?;

        let mut pairs = Vec::with_capacity(rows.len());
        for row in &rows {
            let question: String = row
                .try_get("pergunta")
                .map_err(|e| StoreError::QueryFailed(format!("pergunta column: {e}")))?;
            let answer: String = row
                .try_get("resposta")
                .map_err(|e| StoreError::QueryFailed(format!("resposta column: {e}")))?;
            pairs.push(QaPair { question, answer });
        }

        conn.close().await.ok();
        Ok(pairs)
    }

    /// Replace the whole cache with the given pairs.
    ///
    /// The previous contents are discarded even when `pairs` is empty.
    pub async fn replace_all(&self, pairs: &[QaPair]) -> Result<(), StoreError> {
        let mut conn = self.connect().await?;
        let mut tx = conn
            .begin()
            .await
            .map_err(|e| StoreError::Storage(format!("begin transaction: {e}")))?;

        sqlx::query("DELETE FROM duvidas")
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Storage(format!("DELETE failed: {e}")))?;

        for pair in pairs {
            sqlx::query("INSERT INTO duvidas (pergunta, resposta) VALUES (?1, ?2)")
                .bind(&pair.question)
                .bind(&pair.answer)
                .execute(&mut *tx)
                .await
                .map_err(|e| StoreError::Storage(format!("INSERT failed: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::Storage(format!("commit failed: {e}")))?;

        conn.close().await.ok();
        debug!(count = pairs.len(), "FAQ cache replaced");
        Ok(())
    }

    /// Number of cached pairs.
    pub async fn count(&self) -> Result<usize, StoreError> {
        let mut conn = self.connect().await?;
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM duvidas")
            .fetch_one(&mut conn)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("COUNT: {e}")))?;

        let cnt: i64 = row
            .try_get("cnt")
            .map_err(|e| StoreError::QueryFailed(format!("cnt column: {e}")))?;

        conn.close().await.ok();
        Ok(cnt as usize)
    }
}
