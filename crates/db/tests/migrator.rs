use std::str::FromStr;

use restomenu_db::{Migrate, Plan};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use temp_dir::TempDir;

async fn migrated_pool(dir: &TempDir) -> anyhow::Result<SqlitePool> {
    let path = dir.child("db.sqlite3");
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    restomenu_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(pool)
}

#[tokio::test]
async fn test_migrator_creates_tables() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = migrated_pool(&dir).await?;

    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('user', 'category', 'meal', 'cook') ORDER BY name",
    )
    .fetch_all(&pool)
    .await?;

    let names = tables.into_iter().map(|t| t.0).collect::<Vec<_>>();
    assert_eq!(names, vec!["category", "cook", "meal", "user"]);

    Ok(())
}

#[tokio::test]
async fn test_meal_slug_is_unique_and_category_required() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = migrated_pool(&dir).await?;

    let orphan = sqlx::query(
        "INSERT INTO meal (id, slug, name, description, people, price, preparation_time, image, category_id, created_at) VALUES ('m1', 'pizza', 'Pizza', 'desc', 2, 1000, 15, 'meal/pizza.jpg', 'missing', 0)",
    )
    .execute(&pool)
    .await;
    assert!(orphan.is_err());

    sqlx::query("INSERT INTO category (id, name, created_at) VALUES ('c1', 'LUNCH', 0)")
        .execute(&pool)
        .await?;

    sqlx::query(
        "INSERT INTO meal (id, slug, name, description, people, price, preparation_time, image, category_id, created_at) VALUES ('m1', 'pizza', 'Pizza', 'desc', 2, 1000, 15, 'meal/pizza.jpg', 'c1', 0)",
    )
    .execute(&pool)
    .await?;

    let duplicate = sqlx::query(
        "INSERT INTO meal (id, slug, name, description, people, price, preparation_time, image, category_id, created_at) VALUES ('m2', 'pizza', 'Pizza 2', 'desc', 2, 1000, 15, 'meal/pizza.jpg', 'c1', 0)",
    )
    .execute(&pool)
    .await;
    assert!(duplicate.is_err());

    Ok(())
}
