use restomenu_db::table::Meal;
use sea_query::SqliteQueryBuilder;
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use ulid::Ulid;

use crate::{media::Upload, slugify};

use super::{MealInput, UPLOAD_TO, map_unique_violation};

impl super::Command {
    /// Creates a meal and returns its slug. The image is required.
    pub async fn create(
        &self,
        mut input: MealInput,
        image: Option<Upload>,
    ) -> restomenu_shared::Result<String> {
        if input.slug.trim().is_empty() {
            input.slug = slugify(&input.name);
        }

        self.check(&input, image.as_ref(), true, None).await?;

        let Some(image) = image else {
            restomenu_shared::server!("meal image missing after validation");
        };

        let image = self.media.save(UPLOAD_TO, &image).await?;
        let id = Ulid::new().to_string();
        let now = OffsetDateTime::now_utc().unix_timestamp();

        let (sql, values) = sea_query::Query::insert()
            .into_table(Meal::Table)
            .columns([
                Meal::Id,
                Meal::Slug,
                Meal::Name,
                Meal::Description,
                Meal::People,
                Meal::Price,
                Meal::PreparationTime,
                Meal::Image,
                Meal::CategoryId,
                Meal::CreatedAt,
                Meal::UpdatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                input.slug.to_owned().into(),
                input.name.into(),
                input.description.into(),
                input.people.into(),
                input.price.cents().into(),
                input.preparation_time.into(),
                image.to_owned().into(),
                input.category_id.into(),
                now.into(),
                now.into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        if let Err(err) = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await
        {
            self.media.remove(&image).await;

            return Err(map_unique_violation(err));
        }

        tracing::info!(meal_id = %id, slug = %input.slug, "meal created");

        Ok(input.slug)
    }
}
