//! Tests for transaction MCP tools

use chrono::NaiveDate;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ErrorCode, RawContent},
};
use rust_decimal_macros::dec;

use crate::db::{Account, Category, Id, Repository, SqliteDatabase, Transaction};
use crate::mcp::McpServer;
use crate::mcp::tools::transactions::*;
use crate::ops::QueryOps;

struct Fixture {
    _db: SqliteDatabase,
    server: McpServer,
    checking: Id,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Checking with 25 transactions: one Food 12.50 on 2024-01-01, then 24 Rent
/// payments of 1.00 on consecutive days from 2024-02-01.
async fn setup() -> Fixture {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();

    let mut checking = Account::new("Checking", "BANK");
    db.accounts().create(&mut checking).await.unwrap();
    let mut food = Category::new("Food", "EXPENSE");
    db.categories().create(&mut food).await.unwrap();
    let mut rent = Category::new("Rent", "EXPENSE");
    db.categories().create(&mut rent).await.unwrap();

    let transactions = db.transactions();
    transactions
        .create(&mut Transaction::new(
            checking.account_id,
            food.category_id,
            dec!(12.50),
            date(2024, 1, 1),
            Some("Weekly groceries".to_string()),
        ))
        .await
        .unwrap();
    for day in 1..=24 {
        transactions
            .create(&mut Transaction::new(
                checking.account_id,
                rent.category_id,
                dec!(1.00),
                date(2024, 2, day),
                None,
            ))
            .await
            .unwrap();
    }

    let server = McpServer::new(QueryOps::with_pool(db.pool().clone()));
    Fixture {
        _db: db,
        server,
        checking: checking.account_id,
    }
}

fn json_of(result: &CallToolResult) -> serde_json::Value {
    let text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    };
    serde_json::from_str(text).unwrap()
}

fn len_of(result: &CallToolResult) -> usize {
    json_of(result).as_array().unwrap().len()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_transaction() {
    let fx = setup().await;

    let result = fx
        .server
        .get_transaction(Parameters(GetTransactionParams { transaction_id: 1 }))
        .await
        .unwrap();

    let json = json_of(&result);
    assert_eq!(json["amount"], "12.50");
    assert_eq!(json["transaction_date"], "2024-01-01");
    assert_eq!(json["description"], "Weekly groceries");

    let err = fx
        .server
        .get_transaction(Parameters(GetTransactionParams {
            transaction_id: 9999,
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_account_transactions_resolves_references() {
    let fx = setup().await;

    let result = fx
        .server
        .list_account_transactions(Parameters(AccountParams {
            account_id: fx.checking,
        }))
        .await
        .unwrap();

    let json = json_of(&result);
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 25);
    assert_eq!(items[0]["account"]["name"], "Checking");
    assert_eq!(items[0]["category"]["name"], "Food");
    assert!(items[1].get("description").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_transactions_by_date_range() {
    let fx = setup().await;

    let result = fx
        .server
        .list_transactions_by_date_range(Parameters(DateRangeParams {
            start: "2024-02-01".to_string(),
            end: "2024-02-03".to_string(),
        }))
        .await
        .unwrap();
    assert_eq!(len_of(&result), 3);

    let err = fx
        .server
        .list_transactions_by_date_range(Parameters(DateRangeParams {
            start: "Feb 1".to_string(),
            end: "2024-02-03".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_account_transactions_by_date_range() {
    let fx = setup().await;

    let result = fx
        .server
        .list_account_transactions_by_date_range(Parameters(AccountDateRangeParams {
            account_id: fx.checking,
            start: "2024-01-01".to_string(),
            end: "2024-01-31".to_string(),
        }))
        .await
        .unwrap();
    assert_eq!(len_of(&result), 1);

    let err = fx
        .server
        .list_account_transactions_by_date_range(Parameters(AccountDateRangeParams {
            account_id: fx.checking,
            start: "2024-01-01".to_string(),
            end: "2024-01-32".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_transactions() {
    let fx = setup().await;

    let result = fx
        .server
        .search_transactions(Parameters(SearchTransactionsParams {
            keyword: "GROCERIES".to_string(),
        }))
        .await
        .unwrap();
    assert_eq!(len_of(&result), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_balance_and_count() {
    let fx = setup().await;

    let balance = fx
        .server
        .get_account_balance(Parameters(AccountParams {
            account_id: fx.checking,
        }))
        .await
        .unwrap();
    let json = json_of(&balance);
    assert_eq!(json["account_id"], fx.checking);
    assert_eq!(json["balance"], "36.50");

    let count = fx
        .server
        .get_transaction_count(Parameters(AccountParams {
            account_id: fx.checking,
        }))
        .await
        .unwrap();
    assert_eq!(json_of(&count)["count"], 25);

    let empty = fx
        .server
        .get_account_balance(Parameters(AccountParams { account_id: 999 }))
        .await
        .unwrap();
    assert_eq!(json_of(&empty)["balance"], "0.00");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_latest_transactions_applies_limit() {
    let fx = setup().await;

    let default = fx
        .server
        .get_latest_transactions(Parameters(LatestTransactionsParams {
            account_id: fx.checking,
            limit: None,
        }))
        .await
        .unwrap();
    let json = json_of(&default);
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(items[0]["transaction_date"], "2024-02-24");

    let capped = fx
        .server
        .get_latest_transactions(Parameters(LatestTransactionsParams {
            account_id: fx.checking,
            limit: Some(100),
        }))
        .await
        .unwrap();
    assert_eq!(len_of(&capped), 20);

    let small = fx
        .server
        .get_latest_transactions(Parameters(LatestTransactionsParams {
            account_id: fx.checking,
            limit: Some(2),
        }))
        .await
        .unwrap();
    assert_eq!(len_of(&small), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_transaction_summary() {
    let fx = setup().await;

    let result = fx
        .server
        .get_transaction_summary(Parameters(AccountParams {
            account_id: fx.checking,
        }))
        .await
        .unwrap();

    let json = json_of(&result);
    assert_eq!(
        json,
        serde_json::json!([
            {"category_name": "Food", "total_amount": "12.50", "count": 1},
            {"category_name": "Rent", "total_amount": "24.00", "count": 24},
        ])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_transactions() {
    let fx = setup().await;

    let result = fx.server.list_transactions().await.unwrap();
    assert_eq!(len_of(&result), 25);
}
