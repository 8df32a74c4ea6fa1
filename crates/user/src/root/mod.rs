use std::ops::Deref;

use restomenu_shared::State;

use crate::repository::{self, FindType, UserRow};

mod login;
mod register;
mod set_superuser;
mod update;

pub use login::LoginInput;
pub use register::RegisterInput;
pub use update::UpdateInput;

#[derive(Clone)]
pub struct Command(pub State);

impl Deref for Command {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub is_superuser: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            is_superuser: row.is_superuser,
        }
    }
}

impl Command {
    pub async fn find(&self, id: impl Into<String>) -> restomenu_shared::Result<Option<User>> {
        let row = repository::find(&self.read_db, FindType::Id(id.into())).await?;

        Ok(row.map(User::from))
    }

    pub async fn find_by_username(
        &self,
        username: impl Into<String>,
    ) -> restomenu_shared::Result<Option<User>> {
        let row = repository::find(&self.read_db, FindType::Username(username.into())).await?;

        Ok(row.map(User::from))
    }
}
