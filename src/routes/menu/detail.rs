use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use restomenu_meal::meal::MealRow;
use restomenu_user::User;

use crate::{
    routes::AppState,
    template::{Template, filters},
};

#[derive(askama::Template)]
#[template(path = "meal-detail.html")]
pub struct DetailTemplate {
    pub user: Option<User>,
    pub meal: MealRow,
}

pub async fn page(
    template: Template,
    Path((slug,)): Path<(String,)>,
    State(app): State<AppState>,
) -> impl IntoResponse {
    let meal = match app.meal_command.query().find_by_slug(&slug).await {
        Ok(Some(meal)) => meal,
        Ok(_) => return template.not_found(),
        Err(err) => {
            tracing::error!(slug, err = %err, "failed to find meal");

            return template.server_error();
        }
    };

    template.render(DetailTemplate {
        user: template.user.clone(),
        meal,
    })
}
