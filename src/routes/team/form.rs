use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use restomenu_meal::cook::{CookInput, CookRow};
use restomenu_user::User;

use crate::{
    auth::SuperUser,
    routes::{AppState, multipart::MultipartForm},
    template::{FormErrors, Template, filters},
};

#[derive(Default, Clone)]
pub struct CookForm {
    pub first_name: String,
    pub last_name: String,
    pub about: String,
    pub position: String,
}

impl CookForm {
    fn from_multipart(form: &MultipartForm) -> Self {
        Self {
            first_name: form.text("first_name"),
            last_name: form.text("last_name"),
            about: form.text("about"),
            position: form.text("position"),
        }
    }

    fn from_row(cook: &CookRow) -> Self {
        Self {
            first_name: cook.first_name.to_owned(),
            last_name: cook.last_name.to_owned(),
            about: cook.about.to_owned(),
            position: cook.position.to_owned(),
        }
    }
}

impl From<CookForm> for CookInput {
    fn from(form: CookForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            about: form.about,
            position: form.position,
        }
    }
}

#[derive(askama::Template)]
#[template(path = "cook-form.html")]
pub struct FormTemplate {
    pub user: Option<User>,
    pub title: String,
    pub action: String,
    pub form: CookForm,
    pub errors: FormErrors,
    pub current_image: Option<String>,
}

async fn find_cook(
    template: &Template,
    app: &AppState,
    user: &User,
    id: &str,
) -> Result<CookRow, Response> {
    match app.cook_command.query().find(id).await {
        Ok(Some(cook)) => Ok(cook),
        Ok(_) => Err(template.not_found()),
        Err(err) => {
            tracing::error!(cook = id, user = user.id, err = %err, "failed to find cook");

            Err(template.server_error())
        }
    }
}

pub async fn create(template: Template, SuperUser(user): SuperUser) -> impl IntoResponse {
    template.render(FormTemplate {
        user: Some(user),
        title: "Add a cook".to_owned(),
        action: "/team/create".to_owned(),
        form: CookForm::default(),
        errors: FormErrors::default(),
        current_image: None,
    })
}

pub async fn create_action(
    template: Template,
    SuperUser(user): SuperUser,
    State(app): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let mut multipart = match MultipartForm::parse(multipart).await {
        Ok(form) => form,
        Err(err) => {
            tracing::warn!(user = user.id, err = %err, "invalid multipart body");

            return err.into_response();
        }
    };

    let form = CookForm::from_multipart(&multipart);
    let image = multipart.take_file("image");
    let mut page = FormTemplate {
        user: Some(user.clone()),
        title: "Add a cook".to_owned(),
        action: "/team/create".to_owned(),
        form: form.clone(),
        errors: FormErrors::default(),
        current_image: None,
    };

    match app.cook_command.create(form.into(), image).await {
        Ok(_) => Redirect::to("/team").into_response(),
        Err(restomenu_shared::Error::Validate(errors)) => {
            page.errors = FormErrors::from_validation(&errors, &[]);
            template.render(page)
        }
        Err(err) => {
            tracing::error!(user = user.id, err = %err, "failed to create cook");

            template.server_error()
        }
    }
}

pub async fn update(
    template: Template,
    SuperUser(user): SuperUser,
    Path((id,)): Path<(String,)>,
    State(app): State<AppState>,
) -> impl IntoResponse {
    let cook = match find_cook(&template, &app, &user, &id).await {
        Ok(cook) => cook,
        Err(response) => return response,
    };

    template.render(FormTemplate {
        user: Some(user),
        title: format!("Update {}", cook.full_name()),
        action: format!("/team/{}/update", cook.id),
        form: CookForm::from_row(&cook),
        errors: FormErrors::default(),
        current_image: Some(cook.image),
    })
}

pub async fn update_action(
    template: Template,
    SuperUser(user): SuperUser,
    Path((id,)): Path<(String,)>,
    State(app): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let cook = match find_cook(&template, &app, &user, &id).await {
        Ok(cook) => cook,
        Err(response) => return response,
    };

    let mut multipart = match MultipartForm::parse(multipart).await {
        Ok(form) => form,
        Err(err) => {
            tracing::warn!(user = user.id, err = %err, "invalid multipart body");

            return err.into_response();
        }
    };

    let form = CookForm::from_multipart(&multipart);
    let image = multipart.take_file("image");
    let mut page = FormTemplate {
        user: Some(user.clone()),
        title: format!("Update {}", cook.full_name()),
        action: format!("/team/{}/update", cook.id),
        form: form.clone(),
        errors: FormErrors::default(),
        current_image: Some(cook.image),
    };

    match app.cook_command.update(&id, form.into(), image).await {
        Ok(_) => Redirect::to("/team").into_response(),
        Err(restomenu_shared::Error::Validate(errors)) => {
            page.errors = FormErrors::from_validation(&errors, &[]);
            template.render(page)
        }
        Err(restomenu_shared::Error::NotFound(_)) => template.not_found(),
        Err(err) => {
            tracing::error!(cook = id, user = user.id, err = %err, "failed to update cook");

            template.server_error()
        }
    }
}
