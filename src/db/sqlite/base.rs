//! Generic SQLite repository shared by every entity type.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, Sqlite, SqlitePool, query::Query, sqlite::SqliteArguments, sqlite::SqliteRow};
use tracing::debug;

use super::helpers::map_sqlx_error;
use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, Entity, Id, Repository};

/// A query with SQLite arguments, as passed through [`SqliteEntity::bind_columns`].
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Table mapping for an entity stored in SQLite.
///
/// Every table has an integer identity column and `created_at`/`updated_at`
/// timestamps managed by [`SqliteRepository`]; `COLUMNS` lists the remaining
/// writable columns in the order `bind_columns` binds them.
pub trait SqliteEntity: Entity + for<'r> FromRow<'r, SqliteRow> + Send + Sync + Unpin {
    const TABLE: &'static str;
    const ID_COLUMN: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Bind the values of `COLUMNS`, in order.
    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> DbResult<SqliteQuery<'q>>;

    fn set_id(&mut self, id: Id);

    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>);

    /// `SELECT` of every column, without a `WHERE` clause.
    fn select_sql() -> String {
        format!(
            "SELECT {}, {}, created_at, updated_at FROM {}",
            Self::ID_COLUMN,
            Self::COLUMNS.join(", "),
            Self::TABLE
        )
    }
}

/// SQLx-backed CRUD over any [`SqliteEntity`].
pub struct SqliteRepository<T> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for SqliteRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<T> SqliteRepository<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    /// The shared pool handle.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl<T: SqliteEntity> SqliteRepository<T> {
    pub async fn create(&self, entity: &mut T) -> DbResult<()> {
        let created_at = current_timestamp();
        let sql = format!(
            "INSERT INTO {} ({}, created_at, updated_at) VALUES ({}, ?, ?)",
            T::TABLE,
            T::COLUMNS.join(", "),
            vec!["?"; T::COLUMNS.len()].join(", ")
        );

        let result = entity
            .bind_columns(sqlx::query(&sql))?
            .bind(created_at)
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let id = result.last_insert_rowid();
        debug!(entity = T::ENTITY_TYPE, id, "created");

        entity.set_id(id);
        entity.set_timestamps(created_at, created_at);
        Ok(())
    }

    pub async fn find_by_id(&self, id: Id) -> DbResult<T> {
        let sql = format!("{} WHERE {} = ?", T::select_sql(), T::ID_COLUMN);

        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| DbError::not_found(T::ENTITY_TYPE, id))
    }

    pub async fn find_all(&self) -> DbResult<Vec<T>> {
        let sql = format!("{} ORDER BY {}", T::select_sql(), T::ID_COLUMN);

        sqlx::query_as::<_, T>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    pub async fn update(&self, entity: &mut T) -> DbResult<()> {
        let id = entity.id();
        let updated_at = current_timestamp();
        let assignments = T::COLUMNS
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {}, updated_at = ? WHERE {} = ?",
            T::TABLE,
            assignments,
            T::ID_COLUMN
        );

        let result = entity
            .bind_columns(sqlx::query(&sql))?
            .bind(updated_at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            debug!(entity = T::ENTITY_TYPE, id, "update matched no rows");
            return Err(DbError::not_found(T::ENTITY_TYPE, id));
        }

        // created_at is never rewritten, so reload it for the caller.
        let created_at: DateTime<Utc> = sqlx::query_scalar(&format!(
            "SELECT created_at FROM {} WHERE {} = ?",
            T::TABLE,
            T::ID_COLUMN
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        entity.set_timestamps(created_at, updated_at);
        Ok(())
    }

    pub async fn delete(&self, entity: &T) -> DbResult<()> {
        self.delete_by_id(entity.id()).await
    }

    pub async fn delete_by_id(&self, id: Id) -> DbResult<()> {
        let sql = format!("DELETE FROM {} WHERE {} = ?", T::TABLE, T::ID_COLUMN);

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(
            entity = T::ENTITY_TYPE,
            id,
            rows = result.rows_affected(),
            "deleted"
        );
        Ok(())
    }
}

impl<T: SqliteEntity> Repository<T> for SqliteRepository<T> {
    async fn create(&self, entity: &mut T) -> DbResult<()> {
        SqliteRepository::create(self, entity).await
    }

    async fn find_by_id(&self, id: Id) -> DbResult<T> {
        SqliteRepository::find_by_id(self, id).await
    }

    async fn find_all(&self) -> DbResult<Vec<T>> {
        SqliteRepository::find_all(self).await
    }

    async fn update(&self, entity: &mut T) -> DbResult<()> {
        SqliteRepository::update(self, entity).await
    }

    async fn delete(&self, entity: &T) -> DbResult<()> {
        SqliteRepository::delete(self, entity).await
    }

    async fn delete_by_id(&self, id: Id) -> DbResult<()> {
        SqliteRepository::delete_by_id(self, id).await
    }
}

/// Implement [`Repository`] for a specialized repository by delegating to its
/// `base` field.
macro_rules! delegate_repository {
    ($repo:ty, $entity:ty) => {
        impl $crate::db::Repository<$entity> for $repo {
            async fn create(&self, entity: &mut $entity) -> $crate::db::DbResult<()> {
                self.base.create(entity).await
            }

            async fn find_by_id(&self, id: $crate::db::Id) -> $crate::db::DbResult<$entity> {
                self.base.find_by_id(id).await
            }

            async fn find_all(&self) -> $crate::db::DbResult<Vec<$entity>> {
                self.base.find_all().await
            }

            async fn update(&self, entity: &mut $entity) -> $crate::db::DbResult<()> {
                self.base.update(entity).await
            }

            async fn delete(&self, entity: &$entity) -> $crate::db::DbResult<()> {
                self.base.delete(entity).await
            }

            async fn delete_by_id(&self, id: $crate::db::Id) -> $crate::db::DbResult<()> {
                self.base.delete_by_id(id).await
            }
        }
    };
}

pub(crate) use delegate_repository;
