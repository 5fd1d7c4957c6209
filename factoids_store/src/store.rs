//! sea-orm backed factoid persistence.

use async_trait::async_trait;
use chrono::Utc;
use factoids_core::{Factoid, FactoidRepo, FactoidUpsert, select_current, subject_key};
use factoids_entities::factoids;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Schema, Set,
    sea_query::Expr,
};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

use crate::convert;
use crate::error::StoreError;

/// Rows fetched per round trip by [`FactoidRepo::list_live`].
const PAGE_SIZE: u64 = 100;

/// Factoid storage engine over SQLite or PostgreSQL.
///
/// Every database call is bounded by the timeout given at construction.
pub struct FactoidStore {
    /// Database connection for persistence
    db: DatabaseConnection,
    /// Upper bound for a single database call
    timeout: Duration,
}

impl FactoidStore {
    /// Connect and create the `factoids` table if it is missing.
    ///
    /// # Arguments
    /// * `database_url` - Database connection string
    /// * `timeout` - Bound for connecting and for every later call
    pub async fn new(database_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        info!("Connecting to database for FactoidStore");

        let mut options = ConnectOptions::new(database_url);
        options
            .connect_timeout(timeout)
            .acquire_timeout(timeout)
            .sqlx_logging(false);
        if database_url.starts_with("sqlite::memory:") {
            // every pooled connection would otherwise get its own database
            options.max_connections(1);
        }

        let db = Database::connect(options).await?;
        let store = Self { db, timeout };
        store.create_schema().await?;

        info!("FactoidStore initialized");
        Ok(store)
    }

    async fn create_schema(&self) -> anyhow::Result<()> {
        let backend = self.db.get_database_backend();
        let mut stmt = Schema::new(backend).create_table_from_entity(factoids::Entity);
        stmt.if_not_exists();

        self.bounded(self.db.execute_unprepared(&backend.build(&stmt).to_string()))
            .await?;
        Ok(())
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, DbErr>>,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
            .map_err(StoreError::from)
    }
}

#[async_trait]
impl FactoidRepo for FactoidStore {
    async fn find(&self, scope_id: i64, subject: &str) -> anyhow::Result<Option<Factoid>> {
        let rows = self
            .bounded(
                factoids::Entity::find()
                    .filter(factoids::Column::ChatId.eq(scope_id))
                    .filter(factoids::Column::SubjectKey.eq(subject_key(subject)))
                    .all(&self.db),
            )
            .await?;

        Ok(select_current(
            rows.into_iter().map(convert::factoid_from_model),
        ))
    }

    async fn upsert(&self, payload: &FactoidUpsert) -> anyhow::Result<Factoid> {
        let model = if let Some(id) = payload.id {
            let existing = self
                .bounded(factoids::Entity::find_by_id(id).one(&self.db))
                .await?
                .ok_or(StoreError::NotFound(id))?;

            let mut active: factoids::ActiveModel = existing.into();
            active.subject = Set(payload.subject.clone());
            active.subject_key = Set(subject_key(&payload.subject));
            active.verb = Set(payload.verb.clone());
            active.predicate = Set(payload.predicate.clone());
            active.user_id = Set(payload.author_id);
            active.username = Set(payload.author_name.clone());
            active.modified_at = Set(payload.at);

            let updated = self.bounded(active.update(&self.db)).await?;
            debug!("Overwrote factoid {}", updated.id);
            updated
        } else {
            let active = factoids::ActiveModel {
                chat_id: Set(payload.scope_id),
                subject: Set(payload.subject.clone()),
                subject_key: Set(subject_key(&payload.subject)),
                verb: Set(payload.verb.clone()),
                predicate: Set(payload.predicate.clone()),
                user_id: Set(payload.author_id),
                username: Set(payload.author_name.clone()),
                created_at: Set(payload.at),
                modified_at: Set(payload.at),
                deleted_at: Set(None),
                ..Default::default()
            };

            let inserted = self.bounded(active.insert(&self.db)).await?;
            debug!("Created factoid {}", inserted.id);
            inserted
        };

        Ok(convert::factoid_from_model(model))
    }

    async fn soft_delete(&self, scope_id: i64, subject: &str) -> anyhow::Result<bool> {
        // stamps every live row for the key, duplicates included
        let result = self
            .bounded(
                factoids::Entity::update_many()
                    .col_expr(factoids::Column::DeletedAt, Expr::value(Utc::now()))
                    .filter(factoids::Column::ChatId.eq(scope_id))
                    .filter(factoids::Column::SubjectKey.eq(subject_key(subject)))
                    .filter(factoids::Column::DeletedAt.is_null())
                    .exec(&self.db),
            )
            .await?;

        if result.rows_affected == 0 {
            return Ok(false);
        }

        info!(
            "Soft-deleted {} row(s) for '{subject}' in chat {scope_id}",
            result.rows_affected
        );
        Ok(true)
    }

    fn list_live(&self) -> BoxStream<'_, anyhow::Result<Factoid>> {
        stream::try_unfold(0_u64, move |page| async move {
            let rows = self
                .bounded(
                    factoids::Entity::find()
                        .filter(factoids::Column::DeletedAt.is_null())
                        .order_by_asc(factoids::Column::Id)
                        .paginate(&self.db, PAGE_SIZE)
                        .fetch_page(page),
                )
                .await?;

            if rows.is_empty() {
                return Ok::<_, anyhow::Error>(None);
            }

            let batch = rows
                .into_iter()
                .map(|m| Ok::<_, anyhow::Error>(convert::factoid_from_model(m)));
            Ok(Some((stream::iter(batch), page + 1)))
        })
        .try_flatten()
        .boxed()
    }
}
