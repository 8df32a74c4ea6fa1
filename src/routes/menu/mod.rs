use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use restomenu_meal::{
    category::CategoryRow,
    meal::{MealRow, MealsQuery},
};
use restomenu_user::User;
use serde::Deserialize;

use crate::{
    routes::AppState,
    template::{Template, filters},
};

pub mod delete;
pub mod detail;
pub mod form;

#[derive(Deserialize, Default)]
pub struct MenuQuery {
    pub name: Option<String>,
    pub category: Option<String>,
}

#[derive(askama::Template)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub user: Option<User>,
    pub meals: Vec<MealRow>,
    pub categories: Vec<CategoryRow>,
    pub name: String,
    pub category: String,
}

pub async fn page(
    template: Template,
    Query(query): Query<MenuQuery>,
    State(app): State<AppState>,
) -> impl IntoResponse {
    let name = query.name.unwrap_or_default().trim().to_owned();
    let category = query.category.unwrap_or_default();

    let meals = match app
        .meal_command
        .query()
        .filter(MealsQuery {
            name: Some(name.to_owned()),
            category_id: Some(category.to_owned()),
        })
        .await
    {
        Ok(meals) => meals,
        Err(err) => {
            tracing::error!(name, category, err = %err, "failed to filter meals");

            return template.server_error();
        }
    };

    let categories = match app.category_query.all().await {
        Ok(categories) => categories,
        Err(err) => {
            tracing::error!(err = %err, "failed to list categories");

            return template.server_error();
        }
    };

    template.render(MenuTemplate {
        user: template.user.clone(),
        meals,
        categories,
        name,
        category,
    })
}
