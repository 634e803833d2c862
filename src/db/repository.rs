//! Repository traits for data access abstraction.
//!
//! `Repository<T>` is the CRUD contract shared by every entity type. The
//! entity-specific traits extend it with filtering, joining and aggregation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::db::{
    DbResult,
    models::{Account, Category, Entity, Id, Transaction, TransactionSummary},
};

/// Generic CRUD over a single entity type.
pub trait Repository<T: Entity> {
    /// Insert a new record, writing the generated id and timestamps back.
    async fn create(&self, entity: &mut T) -> DbResult<()>;

    /// Get a record by ID. Fails with `NotFound` when no row matches.
    async fn find_by_id(&self, id: Id) -> DbResult<T>;

    /// Get all records.
    async fn find_all(&self) -> DbResult<Vec<T>>;

    /// Replace every column of the row with the entity's ID.
    ///
    /// Fails with `NotFound` when the ID does not exist.
    async fn update(&self, entity: &mut T) -> DbResult<()>;

    /// Delete the given record. Missing rows are not an error.
    async fn delete(&self, entity: &T) -> DbResult<()>;

    /// Delete a record by ID. Missing rows are not an error.
    async fn delete_by_id(&self, id: Id) -> DbResult<()>;
}

/// Repository for Account operations.
pub trait AccountRepository: Repository<Account> {
    /// Get an account by exact name.
    async fn find_by_name(&self, name: &str) -> DbResult<Account>;

    /// Case-insensitive substring search on the account name.
    async fn find_by_name_like(&self, keyword: &str) -> DbResult<Vec<Account>>;
}

/// Repository for Category operations.
pub trait CategoryRepository: Repository<Category> {
    /// Get all categories with the given type.
    async fn find_by_type(&self, category_type: &str) -> DbResult<Vec<Category>>;

    /// Case-insensitive substring search on the category name.
    async fn find_by_name_like(&self, keyword: &str) -> DbResult<Vec<Category>>;
}

/// Repository for Transaction operations.
///
/// The filtered listings below resolve `account` and `category` eagerly;
/// `find_by_id` and `find_all` return bare rows.
pub trait TransactionRepository: Repository<Transaction> {
    async fn find_by_account_id(&self, account_id: Id) -> DbResult<Vec<Transaction>>;

    /// Transactions dated within `start..=end`.
    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Transaction>>;

    /// Transactions with a non-null description containing `keyword`.
    async fn find_by_description_like(&self, keyword: &str) -> DbResult<Vec<Transaction>>;

    /// Account transactions dated within `start..=end`, most recent first.
    async fn find_by_account_and_date_range(
        &self,
        account_id: Id,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Transaction>>;

    /// Total amount for the account, zero when it has no transactions.
    async fn sum_by_account_id(&self, account_id: Id) -> DbResult<Decimal>;

    async fn count_by_account_id(&self, account_id: Id) -> DbResult<i64>;

    /// The `limit` most recent transactions for the account.
    async fn find_latest_for_account(
        &self,
        account_id: Id,
        limit: u32,
    ) -> DbResult<Vec<Transaction>>;

    /// One summary per category used by the account's transactions.
    async fn group_by_category(&self, account_id: Id) -> DbResult<Vec<TransactionSummary>>;
}
