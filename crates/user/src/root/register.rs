use std::sync::LazyLock;

use regex::Regex;
use ulid::Ulid;
use validator::Validate;

use crate::{password, repository};

pub(crate) static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("valid username regex"));

#[derive(Validate)]
pub struct RegisterInput {
    #[validate(
        length(min = 1, max = 150),
        regex(
            path = *USERNAME_RE,
            message = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
        )
    )]
    pub username: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(must_match(
        other = "password",
        message = "The two password fields didn't match."
    ))]
    pub password_confirm: String,
    pub is_superuser: bool,
}

impl super::Command {
    pub async fn register(&self, input: RegisterInput) -> restomenu_shared::Result<String> {
        input.validate()?;

        if repository::is_username_exists(&self.read_db, &input.username, None).await? {
            restomenu_shared::user!("A user with that username already exists.");
        }

        let password = password::hash_password(&input.password)?;
        let id = Ulid::new().to_string();

        repository::create(
            &self.write_db,
            repository::CreateInput {
                id: id.to_owned(),
                username: input.username.to_owned(),
                email: input.email,
                password,
                is_superuser: input.is_superuser,
            },
        )
        .await?;

        tracing::info!(user_id = %id, username = %input.username, "user registered");

        Ok(id)
    }
}
