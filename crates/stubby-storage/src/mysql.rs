use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::{MySqlPool, Row};
use stubby_core::error::{StorageError, StorageResult};
use stubby_core::{InsertOutcome, MappingStore, ReadStore, Token, UrlMapping};
use tracing::{debug, trace};

const SCHEMA: &str = include_str!("../ddl/mysql/url_mappings.sql");

/// MySQL implementation of the mapping store contract.
///
/// `token` is the primary key of `url_mappings`, so uniqueness is enforced
/// by the database itself: an insert either commits or fails with a
/// duplicate-key error, which is reported as [`InsertOutcome::AlreadyExists`].
/// `created_at` is stored as unix milliseconds.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Creates a store from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> StorageResult<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `url_mappings` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> StorageResult<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("url_mappings schema is in place");
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn parse_created_at(millis: i64) -> StorageResult<Timestamp> {
    Timestamp::from_millisecond(millis).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", millis))
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadStore for MySqlStore {
    async fn lookup(&self, token: &Token) -> StorageResult<Option<UrlMapping>> {
        let row = sqlx::query(
            r#"
            SELECT original_url, created_at
            FROM url_mappings
            WHERE token = ?
            LIMIT 1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let original_url: String = row.try_get("original_url").map_err(map_sqlx_error)?;
        let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

        Ok(Some(UrlMapping {
            token: token.clone(),
            original_url,
            created_at: parse_created_at(created_at)?,
        }))
    }
}

#[async_trait]
impl MappingStore for MySqlStore {
    async fn try_insert(&self, token: &Token, original_url: &str) -> StorageResult<InsertOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO url_mappings (token, original_url, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(token.as_str())
        .bind(original_url)
        .bind(Timestamp::now().as_millisecond())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Created),
            Err(err) if is_unique_violation(&err) => {
                trace!(token = %token, "token already taken");
                Ok(InsertOutcome::AlreadyExists)
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
