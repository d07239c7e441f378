mod bill;
mod json;

use std::str::FromStr;
use std::sync::Arc;

use bill_list::{BillsResource, Store, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::Error as SqlxError;
use thiserror::Error;

pub use json::JsonStore;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Database(#[from] SqlxError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<Error> for StoreError {
    fn from(e: Error) -> StoreError {
        match e {
            Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound => StoreError::Status(404),
            Error::Database(SqlxError::RowNotFound) => StoreError::Status(404),
            e => StoreError::Backend(e.to_string()),
        }
    }
}

type Result<T> = ::std::result::Result<T, Error>;

pub struct SqliteStore {
    conn: Arc<sqlx::pool::Pool<sqlx::sqlite::Sqlite>>,
    owner: Option<String>,
}

impl SqliteStore {
    pub async fn new(uri: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(uri)?.create_if_missing(true);
        // A single connection keeps `sqlite::memory:` databases alive and shared.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let mut conn = pool.acquire().await?;
        sqlx::migrate!("./migrations").run(&mut conn).await?;

        Ok(Self {
            conn: Arc::new(pool),
            owner: None,
        })
    }

    /// Restricts bill listings to those filed by `email`.
    pub fn for_owner<S: Into<String>>(mut self, email: S) -> Self {
        self.owner = Some(email.into());
        self
    }
}

impl Store for SqliteStore {
    fn bills(&self) -> Box<dyn BillsResource + '_> {
        Box::new(bill::Store::new(self))
    }
}
