use axum::{
    Router,
    extract::DefaultBodyLimit,
    response::IntoResponse,
    routing::get,
};
use sqlx::SqlitePool;
use tower_http::services::ServeDir;

use crate::template::Template;

mod health;
mod index;
mod menu;
mod multipart;
mod team;
mod users;

/// Uploaded images may be larger than axum's 2MB default.
const BODY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub user_command: restomenu_user::Command,
    pub meal_command: restomenu_meal::meal::Command,
    pub cook_command: restomenu_meal::cook::Command,
    pub category_query: restomenu_meal::category::Query,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(config: crate::config::Config, state: restomenu_shared::State) -> Self {
        let media = restomenu_meal::media::MediaStorage::new(&config.media.root);

        Self {
            user_command: restomenu_user::Command(state.clone()),
            meal_command: restomenu_meal::meal::Command::new(state.clone(), media.clone()),
            cook_command: restomenu_meal::cook::Command::new(state.clone(), media),
            category_query: restomenu_meal::category::Query(state.read_db.clone()),
            pool: state.read_db,
            config,
        }
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.not_found()
}

pub fn router(app_state: AppState) -> Router {
    let media_root = app_state.config.media.root.to_owned();

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/", get(index::page))
        .route("/menu", get(menu::page))
        .route("/menu/create", get(menu::form::create).post(menu::form::create_action))
        .route("/menu/{slug}", get(menu::detail::page))
        .route(
            "/menu/{slug}/update",
            get(menu::form::update).post(menu::form::update_action),
        )
        .route(
            "/menu/{slug}/delete",
            get(menu::delete::page).post(menu::delete::action),
        )
        .route("/team", get(team::page))
        .route("/team/create", get(team::form::create).post(team::form::create_action))
        .route(
            "/team/{id}/update",
            get(team::form::update).post(team::form::update_action),
        )
        .route(
            "/team/{id}/delete",
            get(team::delete::page).post(team::delete::action),
        )
        .route(
            "/users/login",
            get(users::login::page).post(users::login::action),
        )
        .route(
            "/users/logout",
            get(users::login::logout).post(users::login::logout),
        )
        .route(
            "/users/create",
            get(users::register::page).post(users::register::action),
        )
        .route(
            "/users/{id}/update",
            get(users::update::page).post(users::update::action),
        )
        .fallback(fallback)
        .nest_service("/media", ServeDir::new(media_root))
        .nest_service("/static", crate::assets::AssetsService::new())
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(app_state)
}
