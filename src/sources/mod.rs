//! Post sources: where titles come from.
//!
//! A source returns the titles of the top `limit` posts in its own ranking
//! order, or fewer when the feed runs out.

mod reddit;

pub use reddit::RedditSource;

use crate::error::SourceError;
use async_trait::async_trait;

/// Read-only feed of ranked post titles.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Returns the human-readable name of this source.
    fn name(&self) -> &'static str;

    /// Fetches up to `limit` titles, in ranking order.
    async fn fetch_titles(&self, limit: usize) -> Result<Vec<String>, SourceError>;
}
