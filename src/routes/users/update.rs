use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use restomenu_user::UpdateInput;
use serde::Deserialize;

use crate::{
    auth::AuthUser,
    routes::AppState,
    template::{FormErrors, Template},
};

use super::register::{FIELD_NAMES, UserFormTemplate};

pub async fn page(
    template: Template,
    AuthUser(user): AuthUser,
    Path((id,)): Path<(String,)>,
    State(app): State<AppState>,
) -> impl IntoResponse {
    if user.id != id && !user.is_superuser {
        return template.forbidden();
    }

    let account = match app.user_command.find(&id).await {
        Ok(Some(account)) => account,
        Ok(_) => return template.not_found(),
        Err(err) => {
            tracing::error!(account = id, user = user.id, err = %err, "failed to find user");

            return template.server_error();
        }
    };

    template.render(UserFormTemplate {
        user: Some(user),
        title: format!("Update {}", account.username),
        action: format!("/users/{}/update", account.id),
        username: account.username,
        email: account.email.unwrap_or_default(),
        password_required: false,
        errors: FormErrors::default(),
    })
}

#[derive(Deserialize)]
pub struct ActionInput {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

pub async fn action(
    template: Template,
    AuthUser(user): AuthUser,
    Path((id,)): Path<(String,)>,
    State(app): State<AppState>,
    Form(input): Form<ActionInput>,
) -> impl IntoResponse {
    let username = input.username.trim().to_owned();
    let email = input.email.trim().to_owned();
    let mut page = UserFormTemplate {
        user: Some(user.clone()),
        title: format!("Update {username}"),
        action: format!("/users/{id}/update"),
        username: username.to_owned(),
        email: email.to_owned(),
        password_required: false,
        errors: FormErrors::default(),
    };

    // Both password fields blank keeps the current password.
    let (password, password_confirm) = if input.password1.is_empty() && input.password2.is_empty()
    {
        (None, None)
    } else {
        (Some(input.password1), Some(input.password2))
    };

    let result = app
        .user_command
        .update(
            &user,
            UpdateInput {
                id: id.to_owned(),
                username,
                email: (!email.is_empty()).then_some(email),
                password,
                password_confirm,
            },
        )
        .await;

    match result {
        Ok(_) => Redirect::to("/").into_response(),
        Err(restomenu_shared::Error::Forbidden) => template.forbidden(),
        Err(restomenu_shared::Error::NotFound(_)) => template.not_found(),
        Err(restomenu_shared::Error::Validate(errors)) => {
            page.errors = FormErrors::from_validation(&errors, FIELD_NAMES);
            template.render(page)
        }
        Err(restomenu_shared::Error::User(message)) => {
            page.errors.add("username", message);
            template.render(page)
        }
        Err(err) => {
            tracing::error!(account = id, user = user.id, err = %err, "failed to update user");

            template.server_error()
        }
    }
}
