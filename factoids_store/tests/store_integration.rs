//! Integration tests for `FactoidStore` against in-memory SQLite.
//!
//! These tests verify that:
//! - Inserts assign ids and overwrites keep them
//! - Lookups are case-insensitive and scoped by chat
//! - Soft deletion leaves a tombstone that `list_live` skips
//! - The engine works end to end on top of the store

use chrono::{Duration as ChronoDuration, Utc};
use factoids_core::{Factoid, FactoidEngine, FactoidRepo, FactoidUpsert, FactoidsConfig, InboundMessage};
use factoids_store::FactoidStore;
use futures::TryStreamExt;
use std::sync::Arc;
use std::time::Duration;

async fn store() -> FactoidStore {
    FactoidStore::new("sqlite::memory:", Duration::from_secs(5))
        .await
        .unwrap()
}

fn payload(scope_id: i64, subject: &str, predicate: &str) -> FactoidUpsert {
    FactoidUpsert {
        id: None,
        scope_id,
        subject: subject.to_string(),
        verb: "es".to_string(),
        predicate: predicate.to_string(),
        author_id: 42,
        author_name: Some("ana".to_string()),
        at: Utc::now(),
    }
}

#[tokio::test]
async fn test_insert_and_find() {
    let store = store().await;

    let created = store.upsert(&payload(1, "El Gato", "gracioso")).await.unwrap();
    assert!(created.is_live());
    assert_eq!(created.subject, "El Gato");

    let found = store.find(1, "el gato").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.predicate, "gracioso");
    assert_eq!(found.author_name.as_deref(), Some("ana"));
}

#[tokio::test]
async fn test_find_is_scoped_by_chat() {
    let store = store().await;
    store.upsert(&payload(1, "gato", "gris")).await.unwrap();

    assert!(store.find(2, "gato").await.unwrap().is_none());
    assert!(store.find(1, "perro").await.unwrap().is_none());
}

#[tokio::test]
async fn test_overwrite_keeps_id() {
    let store = store().await;
    let created = store.upsert(&payload(1, "gato", "gris")).await.unwrap();

    let mut update = payload(1, "Gato", "negro");
    update.id = Some(created.id);
    update.author_name = None;
    update.at = created.created_at + ChronoDuration::seconds(30);
    let updated = store.upsert(&update).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.predicate, "negro");
    assert_eq!(updated.author_name, None);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.modified_at > created.modified_at);

    let live: Vec<Factoid> = store.list_live().try_collect().await.unwrap();
    assert_eq!(live.len(), 1);
}

#[tokio::test]
async fn test_overwrite_of_missing_id_fails() {
    let store = store().await;
    let mut update = payload(1, "gato", "gris");
    update.id = Some(404);

    assert!(store.upsert(&update).await.is_err());
}

#[tokio::test]
async fn test_soft_delete() {
    let store = store().await;
    store.upsert(&payload(1, "gato", "gris")).await.unwrap();

    assert!(store.soft_delete(1, "GATO").await.unwrap());
    assert!(!store.soft_delete(1, "gato").await.unwrap());
    assert!(!store.soft_delete(1, "perro").await.unwrap());

    let tombstone = store.find(1, "gato").await.unwrap().unwrap();
    assert!(tombstone.deleted_at.is_some());
}

#[tokio::test]
async fn test_soft_delete_covers_duplicate_live_rows() {
    let store = store().await;
    // two inserts for one key, as after a lookup that failed before the write
    store.upsert(&payload(1, "gato", "gris")).await.unwrap();
    store.upsert(&payload(1, "Gato", "negro")).await.unwrap();
    store.upsert(&payload(2, "gato", "blanco")).await.unwrap();

    assert!(store.soft_delete(1, "gato").await.unwrap());

    assert!(!store.find(1, "gato").await.unwrap().unwrap().is_live());
    let live: Vec<Factoid> = store.list_live().try_collect().await.unwrap();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].scope_id, 2);
}

#[tokio::test]
async fn test_live_record_preferred_over_tombstone() {
    let store = store().await;
    store.upsert(&payload(1, "gato", "gris")).await.unwrap();
    store.soft_delete(1, "gato").await.unwrap();
    let revived = store.upsert(&payload(1, "gato", "negro")).await.unwrap();

    let found = store.find(1, "gato").await.unwrap().unwrap();
    assert_eq!(found.id, revived.id);
    assert!(found.is_live());
}

#[tokio::test]
async fn test_list_live_pages_through_everything() {
    let store = store().await;
    for i in 0..250 {
        store
            .upsert(&payload(1, &format!("cosa {i}"), "algo"))
            .await
            .unwrap();
    }
    store.soft_delete(1, "cosa 0").await.unwrap();

    let live: Vec<Factoid> = store.list_live().try_collect().await.unwrap();
    assert_eq!(live.len(), 249);
    assert!(live.windows(2).all(|w| w[0].id < w[1].id));
    assert!(live.iter().all(Factoid::is_live));

    // a second pass starts from the beginning
    let again: Vec<Factoid> = store.list_live().try_collect().await.unwrap();
    assert_eq!(again.len(), 249);
}

#[tokio::test]
async fn test_engine_on_store() {
    let store = Arc::new(store().await);
    let engine = FactoidEngine::new(&FactoidsConfig::default(), store.clone()).unwrap();
    let message = |text: &str| InboundMessage {
        scope_id: -5,
        sender_id: 9,
        sender_name: None,
        text: text.to_string(),
    };

    assert_eq!(engine.handle(&message("el gato es gracioso")).await, None);
    assert_eq!(engine.handle(&message("el gato es gracioso")).await, None);

    let reply = engine.handle(&message("EL GATO?")).await.unwrap();
    assert_eq!(reply.text, "Someone said that EL GATO es gracioso");

    let live: Vec<Factoid> = store.list_live().try_collect().await.unwrap();
    assert_eq!(live.len(), 1);

    store.soft_delete(-5, "el gato").await.unwrap();
    assert_eq!(engine.handle(&message("el gato?")).await, None);
}
