use axum::{extract::State, response::IntoResponse};
use restomenu_meal::cook::CookRow;
use restomenu_user::User;

use crate::{
    routes::AppState,
    template::{Template, filters},
};

pub mod delete;
pub mod form;

#[derive(askama::Template)]
#[template(path = "team.html")]
pub struct TeamTemplate {
    pub user: Option<User>,
    pub cooks: Vec<CookRow>,
}

pub async fn page(template: Template, State(app): State<AppState>) -> impl IntoResponse {
    let cooks = match app.cook_command.query().all().await {
        Ok(cooks) => cooks,
        Err(err) => {
            tracing::error!(err = %err, "failed to list cooks");

            return template.server_error();
        }
    };

    template.render(TeamTemplate {
        user: template.user.clone(),
        cooks,
    })
}
