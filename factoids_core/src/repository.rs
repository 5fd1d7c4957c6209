use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::factoid::{Factoid, FactoidUpsert};

/// Persistence for factoids, keyed by chat and case-insensitive subject.
#[async_trait]
pub trait FactoidRepo: Send + Sync {
    /// The factoid for `subject` in `scope_id`, live or tombstoned.
    ///
    /// A live record is preferred over tombstones left by earlier deletions.
    async fn find(&self, scope_id: i64, subject: &str) -> anyhow::Result<Option<Factoid>>;

    /// Inserts when `payload.id` is `None`, otherwise overwrites the mutable
    /// fields of that row and bumps `modified_at`.
    async fn upsert(&self, payload: &FactoidUpsert) -> anyhow::Result<Factoid>;

    /// Stamps `deleted_at` on every live row for `subject`.
    ///
    /// Returns `false` when there was nothing live to delete.
    async fn soft_delete(&self, scope_id: i64, subject: &str) -> anyhow::Result<bool>;

    /// All live factoids ordered by id, fetched lazily. Every call starts over.
    fn list_live(&self) -> BoxStream<'_, anyhow::Result<Factoid>>;
}
