use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Category, Meal};

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Meal::Table)
        .col(
            ColumnDef::new(Meal::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Meal::Slug)
                .string()
                .not_null()
                .string_len(255),
        )
        .col(
            ColumnDef::new(Meal::Name)
                .string()
                .not_null()
                .string_len(255),
        )
        .col(
            ColumnDef::new(Meal::Description)
                .string()
                .not_null()
                .string_len(5000),
        )
        .col(ColumnDef::new(Meal::People).integer().not_null())
        .col(ColumnDef::new(Meal::Price).big_integer().not_null())
        .col(ColumnDef::new(Meal::PreparationTime).integer().not_null())
        .col(
            ColumnDef::new(Meal::Image)
                .string()
                .not_null()
                .string_len(255),
        )
        .col(
            ColumnDef::new(Meal::CategoryId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(Meal::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(Meal::UpdatedAt).big_integer().null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_meal_category")
                .from(Meal::Table, Meal::CategoryId)
                .to(Category::Table, Category::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Meal::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
