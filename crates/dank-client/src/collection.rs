//! Collection accessor.

use dank_filter::{Predicate, Record, filter_records};

use crate::client::DankClient;
use crate::error::Result;
use crate::fetch::Records;

/// Accessor for one catalog collection.
///
/// Every collection behaves the same; only the resource path differs.
#[derive(Debug, Clone)]
pub struct Collection {
    client: DankClient,
    path: String,
}

impl Collection {
    pub(crate) fn new(client: DankClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }

    /// Resource path of this collection.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fetch the whole collection.
    pub async fn list(&self) -> Result<Records> {
        self.client.fetch(&self.path).await
    }

    /// Fetch the collection and keep the records matching `predicate`, in
    /// their original order.
    pub async fn query<P>(&self, predicate: &P) -> Result<Vec<Record>>
    where
        P: Predicate + ?Sized,
    {
        let records = self.list().await?;
        Ok(filter_records(records.iter(), predicate))
    }

    /// First record matching `predicate`.
    pub async fn find<P>(&self, predicate: &P) -> Result<Option<Record>>
    where
        P: Predicate + ?Sized,
    {
        let records = self.list().await?;
        Ok(records.iter().find(|r| predicate.matches(r)).cloned())
    }
}
