use restomenu_db::table::Meal;
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    /// Removes the row only, the image stays in media storage.
    pub async fn delete(&self, slug: impl Into<String>) -> restomenu_shared::Result<()> {
        let slug = slug.into();
        let (sql, values) = sea_query::Query::delete()
            .from_table(Meal::Table)
            .and_where(Expr::col(Meal::Slug).eq(slug.as_str()))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            restomenu_shared::not_found!("meal");
        }

        tracing::info!(slug = %slug, "meal deleted");

        Ok(())
    }
}
