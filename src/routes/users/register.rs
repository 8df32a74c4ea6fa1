use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use restomenu_user::{RegisterInput, User};
use serde::Deserialize;

use crate::{
    routes::AppState,
    template::{FormErrors, Template},
};

/// Validation field names as rendered by the account forms.
pub(crate) const FIELD_NAMES: &[(&str, &str)] =
    &[("password", "password1"), ("password_confirm", "password2")];

#[derive(askama::Template)]
#[template(path = "user-form.html")]
pub struct UserFormTemplate {
    pub user: Option<User>,
    pub title: String,
    pub action: String,
    pub username: String,
    pub email: String,
    pub password_required: bool,
    pub errors: FormErrors,
}

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(UserFormTemplate {
        user: template.user.clone(),
        title: "Sign up".to_owned(),
        action: "/users/create".to_owned(),
        username: String::new(),
        email: String::new(),
        password_required: true,
        errors: FormErrors::default(),
    })
}

#[derive(Deserialize)]
pub struct ActionInput {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password1: String,
    pub password2: String,
}

pub async fn action(
    template: Template,
    State(app): State<AppState>,
    Form(input): Form<ActionInput>,
) -> impl IntoResponse {
    let username = input.username.trim().to_owned();
    let email = input.email.trim().to_owned();
    let mut page = UserFormTemplate {
        user: template.user.clone(),
        title: "Sign up".to_owned(),
        action: "/users/create".to_owned(),
        username: username.to_owned(),
        email: email.to_owned(),
        password_required: true,
        errors: FormErrors::default(),
    };

    let result = app
        .user_command
        .register(RegisterInput {
            username,
            email: (!email.is_empty()).then_some(email),
            password: input.password1,
            password_confirm: input.password2,
            is_superuser: false,
        })
        .await;

    match result {
        Ok(id) => {
            tracing::info!(user = id, "user registered");

            Redirect::to("/users/login").into_response()
        }
        Err(restomenu_shared::Error::Validate(errors)) => {
            page.errors = FormErrors::from_validation(&errors, FIELD_NAMES);
            template.render(page)
        }
        Err(restomenu_shared::Error::User(message)) => {
            page.errors.add("username", message);
            template.render(page)
        }
        Err(err) => {
            tracing::error!(err = %err, "failed to register user");

            template.server_error()
        }
    }
}
