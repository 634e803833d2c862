//! SQLite TransactionRepository implementation.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};

use super::base::{SqliteEntity, SqliteQuery, SqliteRepository, delegate_repository};
use super::helpers::{MAX_IN_IDS, contains_ignore_case, map_sqlx_error, placeholders};
use crate::db::utils::{amount_to_cents, cents_to_amount};
use crate::db::{
    Account, Category, DbResult, Id, Transaction, TransactionRepository, TransactionSummary,
};

impl<'r> FromRow<'r, SqliteRow> for Transaction {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let cents: i64 = row.try_get("amount")?;
        Ok(Self {
            transaction_id: row.try_get("transaction_id")?,
            account_id: row.try_get("account_id")?,
            category_id: row.try_get("category_id")?,
            amount: cents_to_amount(cents),
            transaction_date: row.try_get("transaction_date")?,
            description: row.try_get("description")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            account: None,
            category: None,
        })
    }
}

impl SqliteEntity for Transaction {
    const TABLE: &'static str = "transactions";
    const ID_COLUMN: &'static str = "transaction_id";
    const COLUMNS: &'static [&'static str] = &[
        "account_id",
        "category_id",
        "amount",
        "transaction_date",
        "description",
    ];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> DbResult<SqliteQuery<'q>> {
        let cents = amount_to_cents(self.amount)?;
        Ok(query
            .bind(self.account_id)
            .bind(self.category_id)
            .bind(cents)
            .bind(self.transaction_date)
            .bind(&self.description))
    }

    fn set_id(&mut self, id: Id) {
        self.transaction_id = id;
    }

    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = created_at;
        self.updated_at = updated_at;
    }
}

/// SQLx-backed transaction repository.
#[derive(Clone)]
pub struct SqliteTransactionRepository {
    base: SqliteRepository<Transaction>,
}

impl SqliteTransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: SqliteRepository::new(pool),
        }
    }

    fn pool(&self) -> &SqlitePool {
        self.base.pool()
    }

    /// Fill in `account` and `category` with one lookup per relation.
    async fn resolve_references(
        &self,
        mut transactions: Vec<Transaction>,
    ) -> DbResult<Vec<Transaction>> {
        if transactions.is_empty() {
            return Ok(transactions);
        }

        let account_ids: BTreeSet<Id> = transactions.iter().map(|t| t.account_id).collect();
        let category_ids: BTreeSet<Id> = transactions.iter().map(|t| t.category_id).collect();

        let accounts = self.load_by_ids::<Account>(&account_ids).await?;
        let categories = self.load_by_ids::<Category>(&category_ids).await?;

        for transaction in &mut transactions {
            transaction.account = accounts.get(&transaction.account_id).cloned();
            transaction.category = categories.get(&transaction.category_id).cloned();
        }

        Ok(transactions)
    }

    async fn load_by_ids<T: SqliteEntity>(&self, ids: &BTreeSet<Id>) -> DbResult<HashMap<Id, T>> {
        let ids: Vec<Id> = ids.iter().copied().collect();
        let mut loaded = HashMap::with_capacity(ids.len());

        for chunk in ids.chunks(MAX_IN_IDS) {
            let sql = format!(
                "{} WHERE {} IN ({})",
                T::select_sql(),
                T::ID_COLUMN,
                placeholders(chunk.len())
            );

            let mut query = sqlx::query_as::<_, T>(&sql);
            for id in chunk {
                query = query.bind(*id);
            }

            let rows = query.fetch_all(self.pool()).await.map_err(map_sqlx_error)?;
            loaded.extend(rows.into_iter().map(|row| (row.id(), row)));
        }

        Ok(loaded)
    }
}

delegate_repository!(SqliteTransactionRepository, Transaction);

impl TransactionRepository for SqliteTransactionRepository {
    async fn find_by_account_id(&self, account_id: Id) -> DbResult<Vec<Transaction>> {
        let sql = format!(
            "{} WHERE account_id = ? ORDER BY transaction_id",
            Transaction::select_sql()
        );

        let transactions = sqlx::query_as::<_, Transaction>(&sql)
            .bind(account_id)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        self.resolve_references(transactions).await
    }

    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Transaction>> {
        let sql = format!(
            "{} WHERE transaction_date BETWEEN ? AND ? ORDER BY transaction_date, transaction_id",
            Transaction::select_sql()
        );

        let transactions = sqlx::query_as::<_, Transaction>(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        self.resolve_references(transactions).await
    }

    async fn find_by_description_like(&self, keyword: &str) -> DbResult<Vec<Transaction>> {
        let sql = format!(
            "{} WHERE description IS NOT NULL ORDER BY transaction_id",
            Transaction::select_sql()
        );

        let transactions = sqlx::query_as::<_, Transaction>(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?
            .into_iter()
            .filter(|t| {
                t.description
                    .as_deref()
                    .is_some_and(|description| contains_ignore_case(description, keyword))
            })
            .collect();

        self.resolve_references(transactions).await
    }

    async fn find_by_account_and_date_range(
        &self,
        account_id: Id,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Transaction>> {
        let sql = format!(
            "{} WHERE account_id = ? AND transaction_date BETWEEN ? AND ? \
             ORDER BY transaction_date DESC, transaction_id DESC",
            Transaction::select_sql()
        );

        let transactions = sqlx::query_as::<_, Transaction>(&sql)
            .bind(account_id)
            .bind(start)
            .bind(end)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        self.resolve_references(transactions).await
    }

    async fn sum_by_account_id(&self, account_id: Id) -> DbResult<Decimal> {
        let cents: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM transactions WHERE account_id = ?",
        )
        .bind(account_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(cents_to_amount(cents))
    }

    async fn count_by_account_id(&self, account_id: Id) -> DbResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE account_id = ?")
            .bind(account_id)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_latest_for_account(
        &self,
        account_id: Id,
        limit: u32,
    ) -> DbResult<Vec<Transaction>> {
        let sql = format!(
            "{} WHERE account_id = ? ORDER BY transaction_date DESC, transaction_id DESC LIMIT ?",
            Transaction::select_sql()
        );

        let transactions = sqlx::query_as::<_, Transaction>(&sql)
            .bind(account_id)
            .bind(i64::from(limit))
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        self.resolve_references(transactions).await
    }

    async fn group_by_category(&self, account_id: Id) -> DbResult<Vec<TransactionSummary>> {
        let rows = sqlx::query(
            "SELECT c.name AS category_name, SUM(t.amount) AS total_amount, \
                    COUNT(t.transaction_id) AS count \
             FROM transactions t \
             JOIN categories c ON c.category_id = t.category_id \
             WHERE t.account_id = ? \
             GROUP BY c.name \
             ORDER BY c.name",
        )
        .bind(account_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter()
            .map(|row| -> sqlx::Result<TransactionSummary> {
                let cents: i64 = row.try_get("total_amount")?;
                Ok(TransactionSummary {
                    category_name: row.try_get("category_name")?,
                    total_amount: cents_to_amount(cents),
                    count: row.try_get("count")?,
                })
            })
            .collect::<sqlx::Result<Vec<_>>>()
            .map_err(map_sqlx_error)
    }
}
