//! SQLite CategoryRepository implementation.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};

use super::base::{SqliteEntity, SqliteQuery, SqliteRepository, delegate_repository};
use super::helpers::{contains_ignore_case, map_sqlx_error};
use crate::db::{Category, CategoryRepository, DbResult, Id};

impl<'r> FromRow<'r, SqliteRow> for Category {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            category_id: row.try_get("category_id")?,
            name: row.try_get("name")?,
            category_type: row.try_get("category_type")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl SqliteEntity for Category {
    const TABLE: &'static str = "categories";
    const ID_COLUMN: &'static str = "category_id";
    const COLUMNS: &'static [&'static str] = &["name", "category_type"];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> DbResult<SqliteQuery<'q>> {
        Ok(query.bind(&self.name).bind(&self.category_type))
    }

    fn set_id(&mut self, id: Id) {
        self.category_id = id;
    }

    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = created_at;
        self.updated_at = updated_at;
    }
}

/// SQLx-backed category repository.
#[derive(Clone)]
pub struct SqliteCategoryRepository {
    base: SqliteRepository<Category>,
}

impl SqliteCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: SqliteRepository::new(pool),
        }
    }
}

delegate_repository!(SqliteCategoryRepository, Category);

impl CategoryRepository for SqliteCategoryRepository {
    async fn find_by_type(&self, category_type: &str) -> DbResult<Vec<Category>> {
        let sql = format!(
            "{} WHERE category_type = ? ORDER BY category_id",
            Category::select_sql()
        );

        sqlx::query_as::<_, Category>(&sql)
            .bind(category_type)
            .fetch_all(self.base.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_by_name_like(&self, keyword: &str) -> DbResult<Vec<Category>> {
        let sql = format!("{} ORDER BY category_id", Category::select_sql());

        let rows = sqlx::query_as::<_, Category>(&sql)
            .fetch_all(self.base.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .filter(|row| contains_ignore_case(&row.name, keyword))
            .collect())
    }
}
