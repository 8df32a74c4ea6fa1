use restomenu_db::table::User;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;

#[derive(FromRow)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub is_superuser: bool,
}

pub enum FindType {
    Id(String),
    Username(String),
}

pub(crate) async fn find(
    pool: &SqlitePool,
    arg_type: FindType,
) -> restomenu_shared::Result<Option<UserRow>> {
    let mut statement = Query::select()
        .columns([
            User::Id,
            User::Username,
            User::Email,
            User::Password,
            User::IsSuperuser,
        ])
        .from(User::Table)
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Username(username) => statement.and_where(Expr::col(User::Username).eq(username)),
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub struct CreateInput {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub is_superuser: bool,
}

pub(crate) async fn create(pool: &SqlitePool, input: CreateInput) -> restomenu_shared::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([
            User::Id,
            User::Username,
            User::Email,
            User::Password,
            User::IsSuperuser,
            User::CreatedAt,
        ])
        .values_panic([
            input.id.into(),
            input.username.into(),
            input.email.into(),
            input.password.into(),
            input.is_superuser.into(),
            now.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub struct UpdateInput {
    pub id: String,
    pub username: Option<String>,
    pub email: Option<Option<String>>,
    pub password: Option<String>,
    pub is_superuser: Option<bool>,
}

pub(crate) async fn update(pool: &SqlitePool, input: UpdateInput) -> restomenu_shared::Result<()> {
    let mut statement = Query::update()
        .table(User::Table)
        .and_where(Expr::col(User::Id).eq(input.id))
        .to_owned();

    if let Some(username) = input.username {
        statement.value(User::Username, username);
    }

    if let Some(email) = input.email {
        statement.value(User::Email, email);
    }

    if let Some(password) = input.password {
        statement.value(User::Password, password);
    }

    if let Some(is_superuser) = input.is_superuser {
        statement.value(User::IsSuperuser, is_superuser);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn is_username_exists(
    pool: &SqlitePool,
    username: impl Into<String>,
    exclude_id: Option<&str>,
) -> restomenu_shared::Result<bool> {
    let mut statement = Query::select()
        .column(User::Id)
        .from(User::Table)
        .and_where(Expr::col(User::Username).eq(username.into()))
        .to_owned();

    if let Some(id) = exclude_id {
        statement.and_where(Expr::col(User::Id).ne(id));
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}
