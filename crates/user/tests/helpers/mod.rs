use std::{path::PathBuf, str::FromStr};

use restomenu_db::{Migrate, Plan};
use restomenu_user::RegisterInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<restomenu_shared::State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    restomenu_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(restomenu_shared::State::single(pool))
}

#[allow(dead_code)]
pub async fn create_user(
    command: &restomenu_user::Command,
    name: impl Into<String>,
) -> anyhow::Result<String> {
    let ids = create_users(command, vec![name]).await?;

    Ok(ids.first().unwrap().to_owned())
}

#[allow(dead_code)]
pub async fn create_users(
    command: &restomenu_user::Command,
    names: impl IntoIterator<Item = impl Into<String>>,
) -> anyhow::Result<Vec<String>> {
    let mut ids = vec![];
    for name in names.into_iter() {
        let name = name.into();
        let id = command
            .register(RegisterInput {
                username: name.to_owned(),
                email: Some(format!("{name}@restomenu.localhost")),
                password: "my_password".to_owned(),
                password_confirm: "my_password".to_owned(),
                is_superuser: false,
            })
            .await?;
        ids.push(id);
    }

    Ok(ids)
}
