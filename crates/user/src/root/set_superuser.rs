use crate::repository;

impl super::Command {
    pub async fn set_superuser(
        &self,
        username: impl Into<String>,
        is_superuser: bool,
    ) -> restomenu_shared::Result<()> {
        let Some(user) = self.find_by_username(username).await? else {
            restomenu_shared::not_found!("user");
        };

        if user.is_superuser == is_superuser {
            return Ok(());
        }

        repository::update(
            &self.write_db,
            repository::UpdateInput {
                id: user.id,
                username: None,
                email: None,
                password: None,
                is_superuser: Some(is_superuser),
            },
        )
        .await?;

        Ok(())
    }
}
