use clap::ValueEnum;
use restomenu_user::RegisterInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    User,
    Superuser,
}

async fn command(config: &restomenu::config::Config) -> anyhow::Result<restomenu_user::Command> {
    let pool = restomenu::create_pool(&config.database.url, 1).await?;

    Ok(restomenu_user::Command(restomenu_shared::State::single(pool)))
}

pub async fn create_superuser(
    config: restomenu::config::Config,
    username: String,
    password: String,
) -> anyhow::Result<()> {
    let command = command(&config).await?;

    let id = command
        .register(RegisterInput {
            username: username.to_owned(),
            email: None,
            password: password.to_owned(),
            password_confirm: password,
            is_superuser: true,
        })
        .await?;

    tracing::info!(user = id, "{username} created with superuser access");

    Ok(())
}

pub async fn set_role(
    config: restomenu::config::Config,
    username: String,
    role: Role,
) -> anyhow::Result<()> {
    let command = command(&config).await?;

    match command.set_superuser(&username, role == Role::Superuser).await {
        Ok(_) => {}
        Err(restomenu_shared::Error::NotFound(_)) => {
            tracing::error!("user {username} not found");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }

    match role {
        Role::Superuser => tracing::info!("{username} now have superuser access"),
        Role::User => tracing::info!("{username} no longer has superuser access"),
    }

    Ok(())
}
