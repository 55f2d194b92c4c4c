//! Seams between the relay pipeline and the two remote services.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::page::Page;

/// Where today's pages come from and where the notified flag is written back.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// All pages whose date property equals `date`, in the order the source returns them.
    async fn pages_on(&self, date: NaiveDate) -> Result<Vec<Page>>;

    /// Set the notified checkbox on a page. Setting it twice is harmless.
    async fn mark_notified(&self, page_id: &str) -> Result<()>;
}

/// A chat destination that accepts plain text messages.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, content: &str) -> Result<()>;
}
