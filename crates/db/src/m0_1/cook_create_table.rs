use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Cook;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Cook::Table)
        .col(
            ColumnDef::new(Cook::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Cook::FirstName)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(Cook::LastName)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(Cook::About)
                .string()
                .not_null()
                .string_len(2000)
                .default(""),
        )
        .col(
            ColumnDef::new(Cook::Position)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(Cook::Image)
                .string()
                .not_null()
                .string_len(255),
        )
        .col(ColumnDef::new(Cook::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Cook::Table).to_owned()
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
