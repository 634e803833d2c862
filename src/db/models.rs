//! Domain models for the finance database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Numeric identity assigned by the store on insert.
pub type Id = i64;

/// Common behaviour of persisted entities.
pub trait Entity {
    /// Human-readable type name used in errors and logs.
    const ENTITY_TYPE: &'static str;

    /// The entity's identity (0 until created).
    fn id(&self) -> Id;
}

// =============================================================================
// Entities
// =============================================================================

/// A ledger account, e.g. a checking or savings account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Account {
    pub account_id: Id,
    pub name: String,
    pub account_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(name: impl Into<String>, account_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            account_type: account_type.into(),
            ..Default::default()
        }
    }
}

impl Entity for Account {
    const ENTITY_TYPE: &'static str = "Account";

    fn id(&self) -> Id {
        self.account_id
    }
}

/// A transaction category. Names are unique across all categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Category {
    pub category_id: Id,
    pub name: String,
    /// Free-text tag such as "EXPENSE" or "INCOME".
    pub category_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>, category_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category_type: category_type.into(),
            ..Default::default()
        }
    }
}

impl Entity for Category {
    const ENTITY_TYPE: &'static str = "Category";

    fn id(&self) -> Id {
        self.category_id
    }
}

/// A single movement of money on an account.
///
/// `account` and `category` are only populated by queries that resolve
/// references eagerly; they are never written back to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Transaction {
    pub transaction_id: Id,
    pub account_id: Id,
    pub category_id: Id,
    /// Fixed-point amount with two fractional digits.
    pub amount: Decimal,
    pub transaction_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Transaction {
    pub fn new(
        account_id: Id,
        category_id: Id,
        amount: Decimal,
        transaction_date: NaiveDate,
        description: Option<String>,
    ) -> Self {
        Self {
            account_id,
            category_id,
            amount,
            transaction_date,
            description,
            ..Default::default()
        }
    }
}

impl Entity for Transaction {
    const ENTITY_TYPE: &'static str = "Transaction";

    fn id(&self) -> Id {
        self.transaction_id
    }
}

// =============================================================================
// Aggregates
// =============================================================================

/// Per-category totals for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub category_name: String,
    pub total_amount: Decimal,
    pub count: i64,
}
