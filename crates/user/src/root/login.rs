use validator::Validate;

use crate::{
    password,
    repository::{self, FindType},
};

use super::User;

#[derive(Validate)]
pub struct LoginInput {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl super::Command {
    pub async fn login(&self, input: LoginInput) -> restomenu_shared::Result<User> {
        if input.validate().is_err() {
            restomenu_shared::user!("Please enter a correct username and password.");
        }

        let Some(row) =
            repository::find(&self.read_db, FindType::Username(input.username)).await?
        else {
            restomenu_shared::user!("Please enter a correct username and password.");
        };

        if !password::verify_password(&input.password, &row.password)? {
            restomenu_shared::user!("Please enter a correct username and password.");
        }

        Ok(row.into())
    }
}
