use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use restomenu_meal::meal::MealRow;
use restomenu_user::User;

use crate::{auth::SuperUser, routes::AppState, template::Template};

#[derive(askama::Template)]
#[template(path = "meal-delete.html")]
pub struct DeleteTemplate {
    pub user: Option<User>,
    pub meal: MealRow,
}

pub async fn page(
    template: Template,
    SuperUser(user): SuperUser,
    Path((slug,)): Path<(String,)>,
    State(app): State<AppState>,
) -> impl IntoResponse {
    let meal = match app.meal_command.query().find_by_slug(&slug).await {
        Ok(Some(meal)) => meal,
        Ok(_) => return template.not_found(),
        Err(err) => {
            tracing::error!(slug, user = user.id, err = %err, "failed to find meal");

            return template.server_error();
        }
    };

    template.render(DeleteTemplate {
        user: Some(user),
        meal,
    })
}

pub async fn action(
    template: Template,
    SuperUser(user): SuperUser,
    Path((slug,)): Path<(String,)>,
    State(app): State<AppState>,
) -> impl IntoResponse {
    match app.meal_command.delete(&slug).await {
        Ok(_) => Redirect::to("/menu").into_response(),
        Err(restomenu_shared::Error::NotFound(_)) => template.not_found(),
        Err(err) => {
            tracing::error!(slug, user = user.id, err = %err, "failed to delete meal");

            template.server_error()
        }
    }
}
