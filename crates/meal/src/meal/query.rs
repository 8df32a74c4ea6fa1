use restomenu_db::table::{Category, Meal};
use sea_query::{Alias, Expr, ExprTrait, JoinType, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

use crate::Price;

#[derive(Debug, Clone, FromRow)]
pub struct MealRow {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub people: u16,
    #[sqlx(try_from = "i64")]
    pub price: Price,
    pub preparation_time: u16,
    pub image: String,
    pub category_id: String,
    pub category_name: String,
}

#[derive(Default)]
pub struct MealsQuery {
    /// Case-insensitive substring of the meal name.
    pub name: Option<String>,
    pub category_id: Option<String>,
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);

impl super::Command {
    pub fn query(&self) -> Query {
        Query(self.read_db.clone())
    }
}

impl Query {
    fn select() -> SelectStatement {
        sea_query::Query::select()
            .columns([
                (Meal::Table, Meal::Id),
                (Meal::Table, Meal::Slug),
                (Meal::Table, Meal::Name),
                (Meal::Table, Meal::Description),
                (Meal::Table, Meal::People),
                (Meal::Table, Meal::Price),
                (Meal::Table, Meal::PreparationTime),
                (Meal::Table, Meal::Image),
                (Meal::Table, Meal::CategoryId),
            ])
            .expr_as(
                Expr::col((Category::Table, Category::Name)),
                Alias::new("category_name"),
            )
            .from(Meal::Table)
            .join(
                JoinType::InnerJoin,
                Category::Table,
                Expr::col((Meal::Table, Meal::CategoryId)).equals((Category::Table, Category::Id)),
            )
            .to_owned()
    }

    /// Meals ordered by name.
    pub async fn filter(&self, query: MealsQuery) -> restomenu_shared::Result<Vec<MealRow>> {
        let mut statement = Self::select();

        if let Some(name) = query.name.filter(|name| !name.trim().is_empty()) {
            statement.and_where(Expr::cust_with_values(
                "instr(lower(meal.name), lower(?)) > 0",
                [name.trim().to_owned()],
            ));
        }

        if let Some(category_id) = query.category_id.filter(|id| !id.is_empty()) {
            statement.and_where(Expr::col((Meal::Table, Meal::CategoryId)).eq(category_id));
        }

        let (sql, values) = statement
            .order_by((Meal::Table, Meal::Name), Order::Asc)
            .order_by((Meal::Table, Meal::Id), Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, MealRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    /// Most recently created meals first.
    pub async fn latest(&self, limit: u64) -> restomenu_shared::Result<Vec<MealRow>> {
        let (sql, values) = Self::select()
            .order_by((Meal::Table, Meal::CreatedAt), Order::Desc)
            .order_by_expr(Expr::cust("meal.rowid"), Order::Desc)
            .limit(limit)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, MealRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find_by_slug(
        &self,
        slug: impl Into<String>,
    ) -> restomenu_shared::Result<Option<MealRow>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col((Meal::Table, Meal::Slug)).eq(slug.into()))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, MealRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}
