use restomenu_db::table::Meal;
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;

use crate::{media::Upload, slugify};

use super::{MealInput, UPLOAD_TO, map_unique_violation};

impl super::Command {
    /// Updates the meal found by `slug` and returns its current slug. Without an
    /// image the stored one is kept.
    pub async fn update(
        &self,
        slug: impl Into<String>,
        mut input: MealInput,
        image: Option<Upload>,
    ) -> restomenu_shared::Result<String> {
        let Some(meal) = self.query().find_by_slug(slug).await? else {
            restomenu_shared::not_found!("meal");
        };

        if input.slug.trim().is_empty() {
            input.slug = slugify(&input.name);
        }

        self.check(&input, image.as_ref(), false, Some(&meal.id)).await?;

        let mut statement = sea_query::Query::update()
            .table(Meal::Table)
            .values([
                (Meal::Slug, input.slug.to_owned().into()),
                (Meal::Name, input.name.into()),
                (Meal::Description, input.description.into()),
                (Meal::People, input.people.into()),
                (Meal::Price, input.price.cents().into()),
                (Meal::PreparationTime, input.preparation_time.into()),
                (Meal::CategoryId, input.category_id.into()),
                (
                    Meal::UpdatedAt,
                    OffsetDateTime::now_utc().unix_timestamp().into(),
                ),
            ])
            .and_where(Expr::col(Meal::Id).eq(meal.id.as_str()))
            .to_owned();

        let image = match image {
            Some(image) => Some(self.media.save(UPLOAD_TO, &image).await?),
            _ => None,
        };
        if let Some(image) = &image {
            statement.value(Meal::Image, image.to_owned());
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        if let Err(err) = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await
        {
            if let Some(image) = &image {
                self.media.remove(image).await;
            }

            return Err(map_unique_violation(err));
        }

        tracing::info!(meal_id = %meal.id, slug = %input.slug, "meal updated");

        Ok(input.slug)
    }
}
