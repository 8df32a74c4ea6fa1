use std::ops::Deref;

use restomenu_db::table::Category;
use restomenu_shared::State;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;
use time::OffsetDateTime;
use ulid::Ulid;
use validator::Validate;

#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
}

#[derive(Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Clone)]
pub struct Command(pub State);

impl Deref for Command {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    pub async fn create(&self, input: CategoryInput) -> restomenu_shared::Result<String> {
        let input = CategoryInput {
            name: input.name.trim().to_owned(),
        };
        input.validate()?;

        let name = input.name;
        if find_by_name(&self.read_db, &name).await?.is_some() {
            restomenu_shared::user!("Category with this Name already exists.");
        }

        let id = Ulid::new().to_string();
        let (sql, values) = sea_query::Query::insert()
            .into_table(Category::Table)
            .columns([Category::Id, Category::Name, Category::CreatedAt])
            .values_panic([
                id.to_owned().into(),
                name.into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(id)
    }
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);

impl Query {
    pub async fn all(&self) -> restomenu_shared::Result<Vec<CategoryRow>> {
        let (sql, values) = sea_query::Query::select()
            .columns([Category::Id, Category::Name])
            .from(Category::Table)
            .order_by(Category::Name, Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, CategoryRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find(&self, id: impl Into<String>) -> restomenu_shared::Result<Option<CategoryRow>> {
        let (sql, values) = sea_query::Query::select()
            .columns([Category::Id, Category::Name])
            .from(Category::Table)
            .and_where(Expr::col(Category::Id).eq(id.into()))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, CategoryRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}

async fn find_by_name(
    pool: &sqlx::SqlitePool,
    name: &str,
) -> restomenu_shared::Result<Option<CategoryRow>> {
    let (sql, values) = sea_query::Query::select()
        .columns([Category::Id, Category::Name])
        .from(Category::Table)
        .and_where(Expr::col(Category::Name).eq(name))
        .limit(1)
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, CategoryRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}
