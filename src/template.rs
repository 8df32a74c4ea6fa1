use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use restomenu_user::User;
use std::convert::Infallible;

use crate::routes::AppState;

pub(crate) mod filters {
    #[askama::filter_fn]
    pub fn minutes(minutes: &u16, _values: &dyn askama::Values) -> askama::Result<String> {
        let hours = minutes / 60;
        let remaining_minutes = minutes % 60;

        let value = match (hours, remaining_minutes) {
            (0, m) => format!("{m} min"),
            (1, 0) => "1 hour".to_owned(),
            (h, 0) => format!("{h} hours"),
            (h, m) => format!("{h} h {m} min"),
        };

        Ok(value)
    }

    /// Public url of a stored media name.
    #[askama::filter_fn]
    pub fn media(
        name: impl std::fmt::Display,
        _values: &dyn askama::Values,
    ) -> askama::Result<String> {
        Ok(super::media_url(&name.to_string()))
    }
}

pub fn media_url(name: &str) -> String {
    let path = name
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");

    format!("/media/{path}")
}

/// Renders pages for the current visitor, `user` is `None` for anonymous requests.
pub struct Template {
    pub user: Option<User>,
}

impl Template {
    pub fn new(user: Option<User>) -> Self {
        Self { user }
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        self.render_status(StatusCode::OK, template)
    }

    pub fn render_status<T: askama::Template>(&self, status: StatusCode, template: T) -> Response {
        match template.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(err = %err, "failed to render template");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template. Error: {err}"),
                )
                    .into_response()
            }
        }
    }

    pub fn not_found(&self) -> Response {
        self.render_status(
            StatusCode::NOT_FOUND,
            NotFoundTemplate {
                user: self.user.clone(),
            },
        )
    }

    pub fn forbidden(&self) -> Response {
        self.render_status(
            StatusCode::FORBIDDEN,
            ForbiddenTemplate {
                user: self.user.clone(),
            },
        )
    }

    pub fn server_error(&self) -> Response {
        self.render_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            ServerErrorTemplate {
                user: self.user.clone(),
            },
        )
    }
}

impl FromRequestParts<AppState> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Template {
            user: crate::auth::current_user(parts, state).await,
        })
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub user: Option<User>,
}

#[derive(askama::Template)]
#[template(path = "403.html")]
pub struct ForbiddenTemplate {
    pub user: Option<User>,
}

#[derive(askama::Template)]
#[template(path = "500.html")]
pub struct ServerErrorTemplate {
    pub user: Option<User>,
}

/// Field errors keyed by form field, in the order they were reported.
#[derive(Debug, Default, Clone)]
pub struct FormErrors {
    fields: Vec<(String, Vec<String>)>,
    non_field: Vec<String>,
}

impl FormErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();

        match self.fields.iter_mut().find(|(name, _)| name == &field) {
            Some((_, messages)) => messages.push(message),
            _ => self.fields.push((field, vec![message])),
        }
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    pub fn field(&self, name: &str) -> &[String] {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, messages)| messages.as_slice())
            .unwrap_or_default()
    }

    pub fn non_field(&self) -> &[String] {
        &self.non_field
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    /// Adds the errors of `other` for fields that have none here yet.
    pub fn merge_missing(&mut self, other: FormErrors) {
        for (field, messages) in other.fields {
            if self.field(&field).is_empty() {
                self.fields.push((field, messages));
            }
        }

        self.non_field.extend(other.non_field);
    }

    /// Validation errors with their field names mapped to form field names.
    pub fn from_validation(errors: &validator::ValidationErrors, rename: &[(&str, &str)]) -> Self {
        let mut form_errors = Self::default();
        let mut fields = errors.field_errors().into_iter().collect::<Vec<_>>();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        for (field, errors) in fields {
            let field: &str = &field;
            let field = rename
                .iter()
                .find(|(from, _)| *from == field)
                .map(|(_, to)| to.to_string())
                .unwrap_or_else(|| field.to_string());

            for error in errors.iter() {
                form_errors.add(field.to_owned(), message(error));
            }
        }

        form_errors
    }
}

fn message(error: &validator::ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let param = |name: &str| error.params.get(name).map(|v| v.to_string());

    match &*error.code {
        "length" => match (param("min"), param("max")) {
            (Some(min), _) if min == "1" => "This field is required.".to_owned(),
            (Some(min), Some(max)) => {
                format!("Ensure this value has between {min} and {max} characters.")
            }
            (Some(min), _) => format!("Ensure this value has at least {min} characters."),
            (_, Some(max)) => format!("Ensure this value has at most {max} characters."),
            _ => "Invalid length.".to_owned(),
        },
        "range" => match param("min") {
            Some(min) => format!("Ensure this value is greater than or equal to {min}."),
            _ => "Value out of range.".to_owned(),
        },
        "email" => "Enter a valid email address.".to_owned(),
        code => format!("Invalid value ({code})."),
    }
}
