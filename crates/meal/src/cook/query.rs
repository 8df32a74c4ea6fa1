use restomenu_db::table::Cook;
use sea_query::{Expr, ExprTrait, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct CookRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub about: String,
    pub position: String,
    pub image: String,
}

impl CookRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);

impl Query {
    fn select() -> SelectStatement {
        sea_query::Query::select()
            .columns([
                Cook::Id,
                Cook::FirstName,
                Cook::LastName,
                Cook::About,
                Cook::Position,
                Cook::Image,
            ])
            .from(Cook::Table)
            .to_owned()
    }

    /// Team members in the order they joined.
    pub async fn all(&self) -> restomenu_shared::Result<Vec<CookRow>> {
        let (sql, values) = Self::select()
            .order_by(Cook::CreatedAt, Order::Asc)
            .order_by_expr(Expr::cust("cook.rowid"), Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, CookRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find(&self, id: impl Into<String>) -> restomenu_shared::Result<Option<CookRow>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col(Cook::Id).eq(id.into()))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, CookRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}
