//! Process-local factoid repository.

use async_trait::async_trait;
use chrono::Utc;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::Mutex;

use crate::factoid::{Factoid, FactoidUpsert, select_current, subject_key};
use crate::repository::FactoidRepo;

/// `FactoidRepo` backed by a vector behind a mutex.
///
/// Used by the engine tests and by the offline `chat` command.
#[derive(Debug, Default)]
pub struct InMemoryFactoidRepo {
    rows: Mutex<Vec<Factoid>>,
}

impl InMemoryFactoidRepo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored row, tombstones included.
    pub async fn snapshot(&self) -> Vec<Factoid> {
        self.rows.lock().await.clone()
    }
}

#[async_trait]
impl FactoidRepo for InMemoryFactoidRepo {
    async fn find(&self, scope_id: i64, subject: &str) -> anyhow::Result<Option<Factoid>> {
        let key = subject_key(subject);
        let rows = self.rows.lock().await;
        Ok(select_current(
            rows.iter()
                .filter(|f| f.scope_id == scope_id && subject_key(&f.subject) == key)
                .cloned(),
        ))
    }

    async fn upsert(&self, payload: &FactoidUpsert) -> anyhow::Result<Factoid> {
        let mut rows = self.rows.lock().await;

        if let Some(id) = payload.id {
            let existing = rows
                .iter_mut()
                .find(|f| f.id == id)
                .ok_or_else(|| anyhow::anyhow!("Factoid not found: {id}"))?;
            existing.subject.clone_from(&payload.subject);
            existing.verb.clone_from(&payload.verb);
            existing.predicate.clone_from(&payload.predicate);
            existing.author_id = payload.author_id;
            existing.author_name.clone_from(&payload.author_name);
            existing.modified_at = payload.at;
            return Ok(existing.clone());
        }

        let id = rows.iter().map(|f| f.id).max().unwrap_or(0) + 1;
        let factoid = Factoid {
            id,
            scope_id: payload.scope_id,
            subject: payload.subject.clone(),
            verb: payload.verb.clone(),
            predicate: payload.predicate.clone(),
            author_id: payload.author_id,
            author_name: payload.author_name.clone(),
            created_at: payload.at,
            modified_at: payload.at,
            deleted_at: None,
        };
        rows.push(factoid.clone());
        Ok(factoid)
    }

    async fn soft_delete(&self, scope_id: i64, subject: &str) -> anyhow::Result<bool> {
        let key = subject_key(subject);
        let now = Utc::now();
        let mut rows = self.rows.lock().await;
        let mut deleted = false;
        for f in rows
            .iter_mut()
            .filter(|f| f.is_live() && f.scope_id == scope_id && subject_key(&f.subject) == key)
        {
            f.deleted_at = Some(now);
            deleted = true;
        }

        Ok(deleted)
    }

    fn list_live(&self) -> BoxStream<'_, anyhow::Result<Factoid>> {
        stream::once(async move {
            let mut live: Vec<Factoid> = self
                .rows
                .lock()
                .await
                .iter()
                .filter(|f| f.is_live())
                .cloned()
                .collect();
            live.sort_by_key(|f| f.id);
            stream::iter(live.into_iter().map(Ok))
        })
        .flatten()
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use futures::TryStreamExt;

    fn payload(subject: &str, predicate: &str) -> FactoidUpsert {
        FactoidUpsert {
            id: None,
            scope_id: 1,
            subject: subject.to_string(),
            verb: "es".to_string(),
            predicate: predicate.to_string(),
            author_id: 42,
            author_name: Some("ana".to_string()),
            at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let repo = InMemoryFactoidRepo::new();
        let a = repo.upsert(&payload("gato", "gris")).await.unwrap();
        let b = repo.upsert(&payload("perro", "negro")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn overwrite_keeps_id_and_created_at() {
        let repo = InMemoryFactoidRepo::new();
        let first = repo.upsert(&payload("gato", "gris")).await.unwrap();

        let mut second = payload("Gato", "negro");
        second.id = Some(first.id);
        second.at = first.created_at + Duration::seconds(5);
        let updated = repo.upsert(&second).await.unwrap();

        assert_eq!(updated.id, first.id);
        assert_eq!(updated.created_at, first.created_at);
        assert_eq!(updated.predicate, "negro");
        assert!(updated.modified_at > first.modified_at);
        assert_eq!(repo.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn overwrite_of_unknown_id_fails() {
        let repo = InMemoryFactoidRepo::new();
        let mut p = payload("gato", "gris");
        p.id = Some(99);
        assert!(repo.upsert(&p).await.is_err());
    }

    #[tokio::test]
    async fn find_is_case_insensitive_and_scoped() {
        let repo = InMemoryFactoidRepo::new();
        repo.upsert(&payload("Gato", "gris")).await.unwrap();

        assert!(repo.find(1, "GATO").await.unwrap().is_some());
        assert!(repo.find(2, "gato").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn soft_delete_leaves_tombstone() {
        let repo = InMemoryFactoidRepo::new();
        repo.upsert(&payload("gato", "gris")).await.unwrap();

        assert!(repo.soft_delete(1, "gato").await.unwrap());
        assert!(!repo.soft_delete(1, "gato").await.unwrap());

        let found = repo.find(1, "gato").await.unwrap().unwrap();
        assert!(!found.is_live());
    }

    #[tokio::test]
    async fn soft_delete_hides_duplicate_live_rows() {
        let repo = InMemoryFactoidRepo::new();
        repo.upsert(&payload("gato", "gris")).await.unwrap();
        repo.upsert(&payload("Gato", "negro")).await.unwrap();

        assert!(repo.soft_delete(1, "gato").await.unwrap());

        assert!(repo.snapshot().await.iter().all(|f| !f.is_live()));
        assert!(!repo.find(1, "gato").await.unwrap().unwrap().is_live());
    }

    #[tokio::test]
    async fn list_live_skips_tombstones_and_restarts() {
        let repo = InMemoryFactoidRepo::new();
        repo.upsert(&payload("gato", "gris")).await.unwrap();
        repo.upsert(&payload("perro", "negro")).await.unwrap();
        repo.soft_delete(1, "gato").await.unwrap();

        let first: Vec<Factoid> = repo.list_live().try_collect().await.unwrap();
        let again: Vec<Factoid> = repo.list_live().try_collect().await.unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].subject, "perro");
        assert_eq!(first, again);
    }
}
