use validator::{Validate, ValidationError, ValidationErrors};

use crate::{password, repository};

use super::{User, register::USERNAME_RE};

#[derive(Validate)]
pub struct UpdateInput {
    pub id: String,
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
    pub password: Option<String>,
    pub password_confirm: Option<String>,
}

impl UpdateInput {
    fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_default();

        if self.password != self.password_confirm {
            let mut error = ValidationError::new("must_match");
            error.message = Some("The two password fields didn't match.".into());
            errors.add("password_confirm", error);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl super::Command {
    /// Updates the profile of `input.id`. Only the account owner or a superuser may do so.
    pub async fn update(&self, actor: &User, input: UpdateInput) -> restomenu_shared::Result<()> {
        if actor.id != input.id && !actor.is_superuser {
            restomenu_shared::forbidden!();
        }

        input.check()?;

        if self.find(&input.id).await?.is_none() {
            restomenu_shared::not_found!("user");
        }

        if repository::is_username_exists(&self.read_db, &input.username, Some(&input.id)).await? {
            restomenu_shared::user!("A user with that username already exists.");
        }

        let password = match input.password {
            Some(password) => Some(password::hash_password(&password)?),
            _ => None,
        };

        repository::update(
            &self.write_db,
            repository::UpdateInput {
                id: input.id.to_owned(),
                username: Some(input.username),
                email: Some(input.email),
                password,
                is_superuser: None,
            },
        )
        .await?;

        tracing::info!(user_id = %input.id, actor_id = %actor.id, "user updated");

        Ok(())
    }
}
