use std::path::PathBuf;

use async_trait::async_trait;
use bill_list::{BillsResource, RawBill, Store, StoreError};
use tracing::debug;

use super::Result;

/// Bills exported as a JSON array, read fresh on every listing.
pub struct JsonStore {
    path: PathBuf,
    owner: Option<String>,
}

impl JsonStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            owner: None,
        }
    }

    pub fn for_owner<S: Into<String>>(mut self, email: S) -> Self {
        self.owner = Some(email.into());
        self
    }

    async fn read(&self) -> Result<Vec<RawBill>> {
        debug!("reading bills from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        let bills: Vec<RawBill> = serde_json::from_str(&content)?;

        Ok(match &self.owner {
            Some(owner) => bills
                .into_iter()
                .filter(|b| b.email.as_deref() == Some(owner.as_str()))
                .collect(),
            None => bills,
        })
    }
}

struct Bills<'a>(&'a JsonStore);

impl Store for JsonStore {
    fn bills(&self) -> Box<dyn BillsResource + '_> {
        Box::new(Bills(self))
    }
}

#[async_trait]
impl<'a> BillsResource for Bills<'a> {
    async fn list(&self) -> ::std::result::Result<Vec<RawBill>, StoreError> {
        Ok(self.0.read().await?)
    }
}
