//! SQLite AccountRepository implementation.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};

use super::base::{SqliteEntity, SqliteQuery, SqliteRepository, delegate_repository};
use super::helpers::{contains_ignore_case, map_sqlx_error};
use crate::db::{Account, AccountRepository, DbError, DbResult, Entity, Id};

impl<'r> FromRow<'r, SqliteRow> for Account {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            account_id: row.try_get("account_id")?,
            name: row.try_get("name")?,
            account_type: row.try_get("account_type")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl SqliteEntity for Account {
    const TABLE: &'static str = "accounts";
    const ID_COLUMN: &'static str = "account_id";
    const COLUMNS: &'static [&'static str] = &["name", "account_type"];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> DbResult<SqliteQuery<'q>> {
        Ok(query.bind(&self.name).bind(&self.account_type))
    }

    fn set_id(&mut self, id: Id) {
        self.account_id = id;
    }

    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = created_at;
        self.updated_at = updated_at;
    }
}

/// SQLx-backed account repository.
#[derive(Clone)]
pub struct SqliteAccountRepository {
    base: SqliteRepository<Account>,
}

impl SqliteAccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: SqliteRepository::new(pool),
        }
    }
}

delegate_repository!(SqliteAccountRepository, Account);

impl AccountRepository for SqliteAccountRepository {
    async fn find_by_name(&self, name: &str) -> DbResult<Account> {
        let sql = format!("{} WHERE name = ? ORDER BY account_id LIMIT 1", Account::select_sql());

        sqlx::query_as::<_, Account>(&sql)
            .bind(name)
            .fetch_optional(self.base.pool())
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| DbError::not_found(Account::ENTITY_TYPE, name))
    }

    async fn find_by_name_like(&self, keyword: &str) -> DbResult<Vec<Account>> {
        let sql = format!("{} ORDER BY account_id", Account::select_sql());

        let rows = sqlx::query_as::<_, Account>(&sql)
            .fetch_all(self.base.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .filter(|row| contains_ignore_case(&row.name, keyword))
            .collect())
    }
}
