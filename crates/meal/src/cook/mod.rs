use std::ops::Deref;

use restomenu_db::table::Cook;
use restomenu_shared::State;
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use ulid::Ulid;
use validator::Validate;

use crate::{
    meal::field_error,
    media::{MediaStorage, Upload},
};

mod query;

pub use query::*;

pub const UPLOAD_TO: &str = "cooker";

#[derive(Debug, Clone, Validate)]
pub struct CookInput {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(max = 2000))]
    pub about: String,
    #[validate(length(min = 1, max = 100))]
    pub position: String,
}

#[derive(Clone)]
pub struct Command {
    state: State,
    pub media: MediaStorage,
}

impl Deref for Command {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: State, media: MediaStorage) -> Self {
        Self { state, media }
    }

    pub fn query(&self) -> Query {
        Query(self.read_db.clone())
    }

    fn check(
        &self,
        input: &CookInput,
        image: Option<&Upload>,
        image_required: bool,
    ) -> restomenu_shared::Result<()> {
        let mut errors = input.validate().err().unwrap_or_default();

        match image {
            Some(upload) => {
                if let Err(err) = upload.validate() {
                    errors.add("image", err);
                }
            }
            None if image_required => {
                errors.add("image", field_error("required", "This field is required."));
            }
            None => {}
        }

        if !errors.is_empty() {
            return Err(errors.into());
        }

        Ok(())
    }

    pub async fn create(
        &self,
        input: CookInput,
        image: Option<Upload>,
    ) -> restomenu_shared::Result<String> {
        self.check(&input, image.as_ref(), true)?;

        let Some(image) = image else {
            restomenu_shared::server!("cook image missing after validation");
        };

        let image = self.media.save(UPLOAD_TO, &image).await?;
        let id = Ulid::new().to_string();

        let (sql, values) = sea_query::Query::insert()
            .into_table(Cook::Table)
            .columns([
                Cook::Id,
                Cook::FirstName,
                Cook::LastName,
                Cook::About,
                Cook::Position,
                Cook::Image,
                Cook::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                input.first_name.into(),
                input.last_name.into(),
                input.about.into(),
                input.position.into(),
                image.to_owned().into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        if let Err(err) = sqlx::query_with(&sql, values).execute(&self.write_db).await {
            self.media.remove(&image).await;

            return Err(err.into());
        }

        tracing::info!(cook_id = %id, "cook created");

        Ok(id)
    }

    pub async fn update(
        &self,
        id: impl Into<String>,
        input: CookInput,
        image: Option<Upload>,
    ) -> restomenu_shared::Result<()> {
        let Some(cook) = self.query().find(id).await? else {
            restomenu_shared::not_found!("cook");
        };

        self.check(&input, image.as_ref(), false)?;

        let mut statement = sea_query::Query::update()
            .table(Cook::Table)
            .values([
                (Cook::FirstName, input.first_name.into()),
                (Cook::LastName, input.last_name.into()),
                (Cook::About, input.about.into()),
                (Cook::Position, input.position.into()),
            ])
            .and_where(Expr::col(Cook::Id).eq(cook.id.as_str()))
            .to_owned();

        let image = match image {
            Some(image) => Some(self.media.save(UPLOAD_TO, &image).await?),
            _ => None,
        };
        if let Some(image) = &image {
            statement.value(Cook::Image, image.to_owned());
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        if let Err(err) = sqlx::query_with(&sql, values).execute(&self.write_db).await {
            if let Some(image) = &image {
                self.media.remove(image).await;
            }

            return Err(err.into());
        }

        tracing::info!(cook_id = %cook.id, "cook updated");

        Ok(())
    }

    pub async fn delete(&self, id: impl Into<String>) -> restomenu_shared::Result<()> {
        let id = id.into();
        let (sql, values) = sea_query::Query::delete()
            .from_table(Cook::Table)
            .and_where(Expr::col(Cook::Id).eq(id.as_str()))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            restomenu_shared::not_found!("cook");
        }

        tracing::info!(cook_id = %id, "cook deleted");

        Ok(())
    }
}
