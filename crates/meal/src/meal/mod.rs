use std::ops::Deref;

use restomenu_db::table::Meal;
use restomenu_shared::State;
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    Price,
    media::{MediaStorage, Upload},
};

mod create;
mod delete;
mod query;
mod update;

pub use query::*;

/// Directory under the media root where meal images are stored.
pub const UPLOAD_TO: &str = "meal";

#[derive(Debug, Clone, Validate)]
pub struct MealInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub description: String,
    #[validate(range(min = 1, message = "Ensure this value is greater than or equal to 1."))]
    pub people: u16,
    #[validate(custom(function = "crate::types::validate_price"))]
    pub price: Price,
    #[validate(range(min = 1, message = "Ensure this value is greater than or equal to 1."))]
    pub preparation_time: u16,
    #[validate(length(min = 1, message = "This field is required."))]
    pub category_id: String,
    #[validate(length(max = 255), custom(function = "crate::types::validate_slug"))]
    pub slug: String,
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

    /// Field checks that need the database or the uploaded file. All failures are
    /// reported together, keyed by form field. Nothing is written.
    pub async fn check(
        &self,
        input: &MealInput,
        image: Option<&Upload>,
        image_required: bool,
        exclude_id: Option<&str>,
    ) -> restomenu_shared::Result<()> {
        let mut errors = input.validate().err().unwrap_or_default();

        if !input.category_id.is_empty()
            && crate::category::Query(self.read_db.clone())
                .find(&input.category_id)
                .await?
                .is_none()
        {
            errors.add(
                "category_id",
                field_error(
                    "invalid_choice",
                    "Select a valid choice. That choice is not one of the available choices.",
                ),
            );
        }

        if !input.slug.is_empty() && is_slug_exists(&self.read_db, &input.slug, exclude_id).await? {
            errors.add("slug", slug_taken());
        }

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
}

pub(crate) fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn slug_taken() -> ValidationError {
    field_error("unique", "Meal with this Slug already exists.")
}

/// Turns a unique constraint failure on the slug into a form error.
fn map_unique_violation(err: sqlx::Error) -> restomenu_shared::Error {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            let mut errors = ValidationErrors::new();
            errors.add("slug", slug_taken());
            errors.into()
        }
        err => err.into(),
    }
}

async fn is_slug_exists(
    pool: &sqlx::SqlitePool,
    slug: &str,
    exclude_id: Option<&str>,
) -> restomenu_shared::Result<bool> {
    let mut statement = sea_query::Query::select()
        .column(Meal::Id)
        .from(Meal::Table)
        .and_where(Expr::col(Meal::Slug).eq(slug))
        .to_owned();

    if let Some(id) = exclude_id {
        statement.and_where(Expr::col(Meal::Id).ne(id));
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}
