use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use restomenu_meal::{
    Price,
    category::CategoryRow,
    meal::{MealInput, MealRow},
    media::Upload,
    slugify,
};
use restomenu_user::User;

use crate::{
    auth::SuperUser,
    routes::{AppState, multipart::MultipartForm},
    template::{FormErrors, Template, filters},
};

/// Raw form values, kept as typed so a failing form re-renders unchanged.
#[derive(Default, Clone)]
pub struct MealForm {
    pub name: String,
    pub description: String,
    pub people: String,
    pub price: String,
    pub preparation_time: String,
    pub category_id: String,
    pub slug: String,
}

impl MealForm {
    fn from_multipart(form: &MultipartForm) -> Self {
        Self {
            name: form.text("name"),
            description: form.text("description"),
            people: form.text("people"),
            price: form.text("price"),
            preparation_time: form.text("preparation_time"),
            category_id: form.text("category_id"),
            slug: form.text("slug"),
        }
    }

    fn from_row(meal: &MealRow) -> Self {
        Self {
            name: meal.name.to_owned(),
            description: meal.description.to_owned(),
            people: meal.people.to_string(),
            price: meal.price.to_string(),
            preparation_time: meal.preparation_time.to_string(),
            category_id: meal.category_id.to_owned(),
            slug: meal.slug.to_owned(),
        }
    }

    /// Parses numeric fields, reporting text that is not a number per field. A field
    /// that fails to parse holds a placeholder value in the returned input.
    fn parse(&self) -> (MealInput, FormErrors) {
        let mut errors = FormErrors::default();

        let people = parse_whole_number(&self.people, "people", &mut errors);
        let preparation_time =
            parse_whole_number(&self.preparation_time, "preparation_time", &mut errors);

        let price = match self.price.parse::<Price>() {
            Ok(price) => price,
            Err(_) if self.price.is_empty() => {
                errors.add("price", "This field is required.");
                Price::default()
            }
            Err(err) => {
                errors.add("price", err.to_string());
                Price::default()
            }
        };

        let input = MealInput {
            name: self.name.to_owned(),
            description: self.description.to_owned(),
            people,
            price,
            preparation_time,
            category_id: self.category_id.to_owned(),
            slug: self.slug.to_owned(),
        };

        (input, errors)
    }
}

/// Adds the domain errors of the fields that did parse to `errors`, so a single
/// re-render reports every problem of the form.
async fn with_domain_errors(
    app: &AppState,
    mut input: MealInput,
    mut errors: FormErrors,
    image: Option<&Upload>,
    image_required: bool,
    exclude_id: Option<&str>,
) -> restomenu_shared::Result<FormErrors> {
    if input.slug.trim().is_empty() {
        input.slug = slugify(&input.name);
    }

    match app
        .meal_command
        .check(&input, image, image_required, exclude_id)
        .await
    {
        Ok(()) => {}
        Err(restomenu_shared::Error::Validate(domain)) => {
            errors.merge_missing(FormErrors::from_validation(&domain, &[]));
        }
        Err(err) => return Err(err),
    }

    Ok(errors)
}

fn parse_whole_number(value: &str, field: &str, errors: &mut FormErrors) -> u16 {
    if value.is_empty() {
        errors.add(field, "This field is required.");
        return 0;
    }

    match value.parse::<i64>() {
        Ok(v) if v < 1 => {
            errors.add(field, "Ensure this value is greater than or equal to 1.");
            0
        }
        Ok(v) => match u16::try_from(v) {
            Ok(v) => v,
            _ => {
                errors.add(
                    field,
                    format!("Ensure this value is less than or equal to {}.", u16::MAX),
                );
                0
            }
        },
        _ => {
            errors.add(field, "Enter a whole number.");
            0
        }
    }
}

#[derive(askama::Template)]
#[template(path = "meal-form.html")]
pub struct FormTemplate {
    pub user: Option<User>,
    pub title: String,
    pub action: String,
    pub form: MealForm,
    pub errors: FormErrors,
    pub categories: Vec<CategoryRow>,
    pub current_image: Option<String>,
}

impl FormTemplate {
    async fn render(self, template: &Template, app: &AppState) -> Response {
        let categories = match app.category_query.all().await {
            Ok(categories) => categories,
            Err(err) => {
                tracing::error!(err = %err, "failed to list categories");

                return template.server_error();
            }
        };

        template.render(Self { categories, ..self })
    }
}

pub async fn create(
    template: Template,
    SuperUser(user): SuperUser,
    State(app): State<AppState>,
) -> impl IntoResponse {
    FormTemplate {
        user: Some(user),
        title: "Add a meal".to_owned(),
        action: "/menu/create".to_owned(),
        form: MealForm {
            people: "1".to_owned(),
            ..Default::default()
        },
        errors: FormErrors::default(),
        categories: vec![],
        current_image: None,
    }
    .render(&template, &app)
    .await
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

    let form = MealForm::from_multipart(&multipart);
    let image = multipart.take_file("image");
    let mut page = FormTemplate {
        user: Some(user.clone()),
        title: "Add a meal".to_owned(),
        action: "/menu/create".to_owned(),
        form: form.clone(),
        errors: FormErrors::default(),
        categories: vec![],
        current_image: None,
    };

    let (input, errors) = form.parse();
    if !errors.is_empty() {
        page.errors =
            match with_domain_errors(&app, input, errors, image.as_ref(), true, None).await {
                Ok(errors) => errors,
                Err(err) => {
                    tracing::error!(user = user.id, err = %err, "failed to check meal");

                    return template.server_error();
                }
            };

        return page.render(&template, &app).await;
    }

    match app.meal_command.create(input, image).await {
        Ok(slug) => Redirect::to(&format!("/menu/{slug}")).into_response(),
        Err(restomenu_shared::Error::Validate(errors)) => {
            page.errors = FormErrors::from_validation(&errors, &[]);
            page.render(&template, &app).await
        }
        Err(restomenu_shared::Error::User(message)) => {
            page.errors.add_non_field(message);
            page.render(&template, &app).await
        }
        Err(err) => {
            tracing::error!(user = user.id, err = %err, "failed to create meal");

            template.server_error()
        }
    }
}

pub async fn update(
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

    FormTemplate {
        user: Some(user),
        title: format!("Update {}", meal.name),
        action: format!("/menu/{}/update", meal.slug),
        form: MealForm::from_row(&meal),
        errors: FormErrors::default(),
        categories: vec![],
        current_image: Some(meal.image),
    }
    .render(&template, &app)
    .await
}

pub async fn update_action(
    template: Template,
    SuperUser(user): SuperUser,
    Path((slug,)): Path<(String,)>,
    State(app): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let meal = match app.meal_command.query().find_by_slug(&slug).await {
        Ok(Some(meal)) => meal,
        Ok(_) => return template.not_found(),
        Err(err) => {
            tracing::error!(slug, user = user.id, err = %err, "failed to find meal");

            return template.server_error();
        }
    };

    let mut multipart = match MultipartForm::parse(multipart).await {
        Ok(form) => form,
        Err(err) => {
            tracing::warn!(user = user.id, err = %err, "invalid multipart body");

            return err.into_response();
        }
    };

    let form = MealForm::from_multipart(&multipart);
    let image = multipart.take_file("image");
    let mut page = FormTemplate {
        user: Some(user.clone()),
        title: format!("Update {}", meal.name),
        action: format!("/menu/{}/update", meal.slug),
        form: form.clone(),
        errors: FormErrors::default(),
        categories: vec![],
        current_image: Some(meal.image.to_owned()),
    };

    let (input, errors) = form.parse();
    if !errors.is_empty() {
        let checked = with_domain_errors(
            &app,
            input,
            errors,
            image.as_ref(),
            false,
            Some(&meal.id),
        )
        .await;

        page.errors = match checked {
            Ok(errors) => errors,
            Err(err) => {
                tracing::error!(slug, user = user.id, err = %err, "failed to check meal");

                return template.server_error();
            }
        };

        return page.render(&template, &app).await;
    }

    match app.meal_command.update(&slug, input, image).await {
        Ok(slug) => Redirect::to(&format!("/menu/{slug}")).into_response(),
        Err(restomenu_shared::Error::Validate(errors)) => {
            page.errors = FormErrors::from_validation(&errors, &[]);
            page.render(&template, &app).await
        }
        Err(restomenu_shared::Error::NotFound(_)) => template.not_found(),
        Err(restomenu_shared::Error::User(message)) => {
            page.errors.add_non_field(message);
            page.render(&template, &app).await
        }
        Err(err) => {
            tracing::error!(slug, user = user.id, err = %err, "failed to update meal");

            template.server_error()
        }
    }
}
