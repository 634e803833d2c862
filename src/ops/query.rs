//! Read-only query facade over the account, category and transaction
//! repositories.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::config::ConnectionConfig;
use crate::db::{
    Account, AccountRepository, Category, CategoryRepository, DbError, DbResult, Id, Repository,
    SqliteAccountRepository, SqliteCategoryRepository, SqliteDatabase,
    SqliteTransactionRepository, Transaction, TransactionRepository, TransactionSummary,
};

/// One way of supplying the facade's repositories.
///
/// Options are applied in order; a later option replaces the repositories set
/// by an earlier one.
#[derive(Clone)]
pub enum QueryOption {
    /// Use already-constructed repositories.
    Repositories {
        accounts: SqliteAccountRepository,
        categories: SqliteCategoryRepository,
        transactions: SqliteTransactionRepository,
    },
    /// Build repositories over an open pool.
    Pool(SqlitePool),
    /// Connect using the configuration, then build repositories over the pool.
    Config(ConnectionConfig),
}

/// Flat Get/Search/GetAll surface over the three repositories.
///
/// Every method passes straight through to one repository method.
#[derive(Clone, Default)]
pub struct QueryOps {
    accounts: Option<SqliteAccountRepository>,
    categories: Option<SqliteCategoryRepository>,
    transactions: Option<SqliteTransactionRepository>,
}

impl QueryOps {
    /// Build the facade from the given options.
    ///
    /// Without options the facade has no repositories and every call fails
    /// with [`DbError::Configuration`].
    pub async fn new(options: impl IntoIterator<Item = QueryOption>) -> DbResult<Self> {
        let mut ops = Self::default();
        for option in options {
            ops.apply(option).await?;
        }
        Ok(ops)
    }

    /// Build the facade directly from repositories.
    pub fn with_repositories(
        accounts: SqliteAccountRepository,
        categories: SqliteCategoryRepository,
        transactions: SqliteTransactionRepository,
    ) -> Self {
        Self {
            accounts: Some(accounts),
            categories: Some(categories),
            transactions: Some(transactions),
        }
    }

    /// Build the facade over an open pool.
    pub fn with_pool(pool: SqlitePool) -> Self {
        let db = SqliteDatabase::from_pool(pool);
        Self::with_repositories(db.accounts(), db.categories(), db.transactions())
    }

    async fn apply(&mut self, option: QueryOption) -> DbResult<()> {
        *self = match option {
            QueryOption::Repositories {
                accounts,
                categories,
                transactions,
            } => Self::with_repositories(accounts, categories, transactions),
            QueryOption::Pool(pool) => Self::with_pool(pool),
            QueryOption::Config(config) => {
                let db = SqliteDatabase::connect(&config).await?;
                Self::with_pool(db.pool().clone())
            }
        };
        Ok(())
    }

    fn accounts(&self) -> DbResult<&SqliteAccountRepository> {
        self.accounts.as_ref().ok_or_else(|| unconfigured("account"))
    }

    fn categories(&self) -> DbResult<&SqliteCategoryRepository> {
        self.categories
            .as_ref()
            .ok_or_else(|| unconfigured("category"))
    }

    fn transactions(&self) -> DbResult<&SqliteTransactionRepository> {
        self.transactions
            .as_ref()
            .ok_or_else(|| unconfigured("transaction"))
    }

    // -- Accounts

    pub async fn get_account_by_id(&self, account_id: Id) -> DbResult<Account> {
        self.accounts()?.find_by_id(account_id).await
    }

    pub async fn get_account_by_name(&self, name: &str) -> DbResult<Account> {
        self.accounts()?.find_by_name(name).await
    }

    /// Accounts whose name contains `keyword`, ignoring case.
    pub async fn search_accounts(&self, keyword: &str) -> DbResult<Vec<Account>> {
        self.accounts()?.find_by_name_like(keyword).await
    }

    pub async fn get_all_accounts(&self) -> DbResult<Vec<Account>> {
        self.accounts()?.find_all().await
    }

    // -- Categories

    pub async fn get_category_by_id(&self, category_id: Id) -> DbResult<Category> {
        self.categories()?.find_by_id(category_id).await
    }

    pub async fn get_categories_by_type(&self, category_type: &str) -> DbResult<Vec<Category>> {
        self.categories()?.find_by_type(category_type).await
    }

    /// Categories whose name contains `keyword`, ignoring case.
    pub async fn search_categories(&self, keyword: &str) -> DbResult<Vec<Category>> {
        self.categories()?.find_by_name_like(keyword).await
    }

    pub async fn get_all_categories(&self) -> DbResult<Vec<Category>> {
        self.categories()?.find_all().await
    }

    // -- Transactions

    pub async fn get_transaction_by_id(&self, transaction_id: Id) -> DbResult<Transaction> {
        self.transactions()?.find_by_id(transaction_id).await
    }

    pub async fn get_transactions_by_account_id(
        &self,
        account_id: Id,
    ) -> DbResult<Vec<Transaction>> {
        self.transactions()?.find_by_account_id(account_id).await
    }

    pub async fn get_transactions_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Transaction>> {
        self.transactions()?.find_by_date_range(start, end).await
    }

    pub async fn get_transactions_by_account_and_date_range(
        &self,
        account_id: Id,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Transaction>> {
        self.transactions()?
            .find_by_account_and_date_range(account_id, start, end)
            .await
    }

    pub async fn search_transactions_by_description(
        &self,
        keyword: &str,
    ) -> DbResult<Vec<Transaction>> {
        self.transactions()?.find_by_description_like(keyword).await
    }

    /// Sum of all transaction amounts on the account.
    pub async fn get_account_balance(&self, account_id: Id) -> DbResult<Decimal> {
        self.transactions()?.sum_by_account_id(account_id).await
    }

    pub async fn get_transaction_count(&self, account_id: Id) -> DbResult<i64> {
        self.transactions()?.count_by_account_id(account_id).await
    }

    pub async fn get_latest_transactions(
        &self,
        account_id: Id,
        limit: u32,
    ) -> DbResult<Vec<Transaction>> {
        self.transactions()?
            .find_latest_for_account(account_id, limit)
            .await
    }

    pub async fn get_transaction_summary_by_category(
        &self,
        account_id: Id,
    ) -> DbResult<Vec<TransactionSummary>> {
        self.transactions()?.group_by_category(account_id).await
    }

    pub async fn get_all_transactions(&self) -> DbResult<Vec<Transaction>> {
        self.transactions()?.find_all().await
    }
}

fn unconfigured(repository: &str) -> DbError {
    DbError::Configuration {
        message: format!("{repository} repository is not configured"),
    }
}
