use std::{io::Cursor, path::Path, str::FromStr};

use restomenu_db::{Migrate, Plan};
use restomenu_meal::{
    Price,
    category::CategoryInput,
    meal::MealInput,
    media::{MediaStorage, Upload},
};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub struct TestState {
    pub state: restomenu_shared::State,
    pub media: MediaStorage,
}

impl TestState {
    #[allow(dead_code)]
    pub fn meal(&self) -> restomenu_meal::meal::Command {
        restomenu_meal::meal::Command::new(self.state.clone(), self.media.clone())
    }

    #[allow(dead_code)]
    pub fn cook(&self) -> restomenu_meal::cook::Command {
        restomenu_meal::cook::Command::new(self.state.clone(), self.media.clone())
    }

    pub fn category(&self) -> restomenu_meal::category::Command {
        restomenu_meal::category::Command(self.state.clone())
    }
}

pub async fn setup_test_state(dir: &Path) -> anyhow::Result<TestState> {
    let path = dir.join("db.sqlite3");
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    restomenu_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(TestState {
        state: restomenu_shared::State::single(pool),
        media: MediaStorage::new(dir.join("media")),
    })
}

#[allow(dead_code)]
pub async fn create_category(state: &TestState, name: &str) -> anyhow::Result<String> {
    Ok(state
        .category()
        .create(CategoryInput {
            name: name.to_owned(),
        })
        .await?)
}

#[allow(dead_code)]
pub fn png() -> Upload {
    let mut data = Cursor::new(Vec::new());
    image::RgbImage::new(4, 4)
        .write_to(&mut data, image::ImageFormat::Png)
        .unwrap();

    Upload {
        filename: "test_image.png".to_owned(),
        content_type: "image/jpeg".to_owned(),
        data: data.into_inner(),
    }
}

#[allow(dead_code)]
pub fn meal_input(name: &str, slug: &str, price: &str, category_id: &str) -> MealInput {
    MealInput {
        name: name.to_owned(),
        description: format!("{name} description"),
        people: 2,
        price: Price::from_str(price).unwrap(),
        preparation_time: 20,
        category_id: category_id.to_owned(),
        slug: slug.to_owned(),
    }
}
