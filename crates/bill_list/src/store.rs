use async_trait::async_trait;
use thiserror::Error;

use crate::model::RawBill;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend answered with an HTTP-style status code.
    #[error("Erreur {0}")]
    Status(u16),
    /// Any other backend failure, shown to the user as-is.
    #[error("{0}")]
    Backend(String),
}

impl PartialEq for StoreError {
    fn eq(&self, other: &StoreError) -> bool {
        self.to_string() == other.to_string()
    }
}

pub type Result<T> = ::std::result::Result<T, StoreError>;

/// Remote data service the bill list reads from.
pub trait Store: Send + Sync {
    fn bills(&self) -> Box<dyn BillsResource + '_>;
}

#[async_trait]
pub trait BillsResource: Send + Sync {
    async fn list(&self) -> Result<Vec<RawBill>>;
}
