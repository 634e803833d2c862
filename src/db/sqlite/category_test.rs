//! Tests for SqliteCategoryRepository.

use crate::db::{Category, CategoryRepository, DbError, Repository, SqliteDatabase};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

#[tokio::test(flavor = "multi_thread")]
async fn create_and_find_category() {
    let db = setup_db().await;
    let repo = db.categories();

    let mut category = Category::new("Food", "EXPENSE");
    repo.create(&mut category).await.expect("Create should succeed");
    assert!(category.category_id > 0);

    let found = repo.find_by_id(category.category_id).await.unwrap();
    assert_eq!(found, category);
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_category_name_violates_constraint() {
    let db = setup_db().await;
    let repo = db.categories();

    repo.create(&mut Category::new("Food", "EXPENSE"))
        .await
        .unwrap();

    let result = repo.create(&mut Category::new("Food", "INCOME")).await;
    assert!(matches!(result, Err(DbError::Constraint { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_category_to_existing_name_violates_constraint() {
    let db = setup_db().await;
    let repo = db.categories();

    repo.create(&mut Category::new("Food", "EXPENSE"))
        .await
        .unwrap();
    let mut salary = Category::new("Salary", "INCOME");
    repo.create(&mut salary).await.unwrap();

    salary.name = "Food".to_string();
    let result = repo.update(&mut salary).await;
    assert!(matches!(result, Err(DbError::Constraint { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn find_categories_by_type() {
    let db = setup_db().await;
    let repo = db.categories();

    for (name, kind) in [
        ("Food", "EXPENSE"),
        ("Rent", "EXPENSE"),
        ("Salary", "INCOME"),
    ] {
        repo.create(&mut Category::new(name, kind)).await.unwrap();
    }

    let expenses = repo.find_by_type("EXPENSE").await.unwrap();
    let names: Vec<&str> = expenses.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Food", "Rent"]);

    let transfers = repo.find_by_type("TRANSFER").await.unwrap();
    assert!(transfers.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn find_categories_by_name_like() {
    let db = setup_db().await;
    let repo = db.categories();

    for (name, kind) in [
        ("Groceries", "EXPENSE"),
        ("Fast Food", "EXPENSE"),
        ("Food Delivery", "EXPENSE"),
    ] {
        repo.create(&mut Category::new(name, kind)).await.unwrap();
    }

    let food = repo.find_by_name_like("food").await.unwrap();
    assert_eq!(food.len(), 2);

    let none = repo.find_by_name_like("travel").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_category() {
    let db = setup_db().await;
    let repo = db.categories();

    let mut category = Category::new("Misc", "EXPENSE");
    repo.create(&mut category).await.unwrap();
    repo.delete(&category).await.unwrap();

    let result = repo.find_by_id(category.category_id).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn find_categories_by_name_like_folds_non_ascii_case() {
    let db = setup_db().await;
    let repo = db.categories();

    repo.create(&mut Category::new("Épicerie", "EXPENSE")).await.unwrap();
    repo.create(&mut Category::new("Spielwaren", "EXPENSE")).await.unwrap();

    let matches = repo.find_by_name_like("épic").await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].name, "Épicerie");
}
