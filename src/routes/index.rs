use axum::{extract::State, response::IntoResponse};
use restomenu_meal::{cook::CookRow, meal::MealRow};
use restomenu_user::User;

use crate::{
    routes::AppState,
    template::{Template, filters},
};

const LATEST_MEALS: u64 = 6;

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub user: Option<User>,
    pub meals: Vec<MealRow>,
    pub cooks: Vec<CookRow>,
}

pub async fn page(template: Template, State(app): State<AppState>) -> impl IntoResponse {
    let meals = match app.meal_command.query().latest(LATEST_MEALS).await {
        Ok(meals) => meals,
        Err(err) => {
            tracing::error!(err = %err, "failed to list latest meals");

            return template.server_error();
        }
    };

    let cooks = match app.cook_command.query().all().await {
        Ok(cooks) => cooks,
        Err(err) => {
            tracing::error!(err = %err, "failed to list cooks");

            return template.server_error();
        }
    };

    template.render(IndexTemplate {
        user: template.user.clone(),
        meals,
        cooks,
    })
}
