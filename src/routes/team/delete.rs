use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use restomenu_meal::cook::CookRow;
use restomenu_user::User;

use crate::{auth::SuperUser, routes::AppState, template::Template};

#[derive(askama::Template)]
#[template(path = "cook-delete.html")]
pub struct DeleteTemplate {
    pub user: Option<User>,
    pub cook: CookRow,
}

pub async fn page(
    template: Template,
    SuperUser(user): SuperUser,
    Path((id,)): Path<(String,)>,
    State(app): State<AppState>,
) -> impl IntoResponse {
    let cook = match app.cook_command.query().find(&id).await {
        Ok(Some(cook)) => cook,
        Ok(_) => return template.not_found(),
        Err(err) => {
            tracing::error!(cook = id, user = user.id, err = %err, "failed to find cook");

            return template.server_error();
        }
    };

    template.render(DeleteTemplate {
        user: Some(user),
        cook,
    })
}

pub async fn action(
    template: Template,
    SuperUser(user): SuperUser,
    Path((id,)): Path<(String,)>,
    State(app): State<AppState>,
) -> impl IntoResponse {
    match app.cook_command.delete(&id).await {
        Ok(_) => Redirect::to("/team").into_response(),
        Err(restomenu_shared::Error::NotFound(_)) => template.not_found(),
        Err(err) => {
            tracing::error!(cook = id, user = user.id, err = %err, "failed to delete cook");

            template.server_error()
        }
    }
}
