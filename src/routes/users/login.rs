use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::CookieJar;
use restomenu_user::{LoginInput, User};
use serde::Deserialize;

use crate::{
    auth::{build_cookie, removal_cookie, safe_next},
    routes::AppState,
    template::Template,
};

#[derive(askama::Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub user: Option<User>,
    pub username: String,
    pub next: String,
    pub error_message: Option<String>,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub next: Option<String>,
}

pub async fn page(template: Template, Query(query): Query<PageQuery>) -> impl IntoResponse {
    template.render(LoginTemplate {
        user: template.user.clone(),
        username: String::new(),
        next: query.next.unwrap_or_default(),
        error_message: None,
    })
}

#[derive(Deserialize)]
pub struct ActionInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

pub async fn action(
    template: Template,
    State(app): State<AppState>,
    jar: CookieJar,
    Form(input): Form<ActionInput>,
) -> impl IntoResponse {
    let user = match app
        .user_command
        .login(LoginInput {
            username: input.username.trim().to_owned(),
            password: input.password.to_owned(),
        })
        .await
    {
        Ok(user) => user,
        Err(restomenu_shared::Error::User(message)) => {
            return template.render(LoginTemplate {
                user: template.user.clone(),
                username: input.username,
                next: input.next.unwrap_or_default(),
                error_message: Some(message),
            });
        }
        Err(err) => {
            tracing::error!(username = input.username, err = %err, "failed to login");

            return template.server_error();
        }
    };

    let cookie = match build_cookie(&app.config.jwt, user.id.to_owned()) {
        Ok(cookie) => cookie,
        Err(err) => {
            tracing::error!(user = user.id, err = %err, "failed to build auth cookie");

            return template.server_error();
        }
    };

    tracing::info!(user = user.id, "user logged in");

    (
        jar.add(cookie),
        Redirect::to(&safe_next(input.next.as_deref())),
    )
        .into_response()
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(removal_cookie()), Redirect::to("/"))
}
