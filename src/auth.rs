use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use restomenu_user::User;
use serde::{Deserialize, Serialize};

use crate::{
    config::JwtConfig,
    routes::AppState,
    template::Template,
};

pub const AUTH_COOKIE_NAME: &str = "auth_token";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    aud: String,
    exp: u64,
    iat: u64,
    iss: String,
    sub: String,
}

pub fn generate_token(config: &JwtConfig, sub: String) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let claims = Claims {
        aud: config.audience.to_owned(),
        exp: now + config.expiration_days.max(1) as u64 * 24 * 60 * 60,
        iat: now,
        iss: config.issuer.to_owned(),
        sub,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn verify_token(config: &JwtConfig, token: &str) -> Option<String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.to_owned()]);
    validation.set_audience(&[config.audience.to_owned()]);

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => Some(data.claims.sub),
        Err(err) => {
            tracing::debug!(err = %err, "invalid auth token");
            None
        }
    }
}

pub fn build_cookie<'a>(config: &JwtConfig, sub: String) -> anyhow::Result<Cookie<'a>> {
    let token = generate_token(config, sub)?;

    Ok(Cookie::build((AUTH_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build())
}

pub fn removal_cookie<'a>() -> Cookie<'a> {
    Cookie::build(AUTH_COOKIE_NAME).path("/").build()
}

/// Login url that brings the visitor back to `path_and_query` afterwards.
pub fn login_url(path_and_query: &str) -> String {
    format!(
        "/users/login?next={}",
        urlencoding::encode(path_and_query)
    )
}

/// Only local absolute paths are honored, anything else falls back to the index.
pub fn safe_next(next: Option<&str>) -> String {
    match next {
        Some(next) if next.starts_with('/') && !next.starts_with("//") && !next.contains('\\') => {
            next.to_owned()
        }
        _ => "/".to_owned(),
    }
}

/// 302 to the login page, keeping the requested url as `next`.
pub fn login_redirect(parts: &Parts) -> Response {
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or("/");

    (
        StatusCode::FOUND,
        [(header::LOCATION, login_url(path_and_query))],
    )
        .into_response()
}

#[derive(Clone)]
struct CurrentUser(Option<User>);

/// Resolves the user from the auth cookie once per request.
pub(crate) async fn current_user(parts: &mut Parts, state: &AppState) -> Option<User> {
    if let Some(CurrentUser(user)) = parts.extensions.get::<CurrentUser>() {
        return user.clone();
    }

    let jar = CookieJar::from_headers(&parts.headers);
    let user = match jar
        .get(AUTH_COOKIE_NAME)
        .and_then(|cookie| verify_token(&state.config.jwt, cookie.value()))
    {
        Some(id) => match state.user_command.find(&id).await {
            Ok(user) => user,
            Err(err) => {
                tracing::error!(user = id, err = %err, "failed to load user from auth token");
                None
            }
        },
        _ => None,
    };

    parts.extensions.insert(CurrentUser(user.clone()));

    user
}

pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match current_user(parts, state).await {
            Some(user) => Ok(AuthUser(user)),
            _ => Err(login_redirect(parts)),
        }
    }
}

/// Logged in superuser. Anonymous visitors are sent to the login page, other
/// users get the 403 page.
pub struct SuperUser(pub User);

impl FromRequestParts<AppState> for SuperUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(user) = current_user(parts, state).await else {
            return Err(login_redirect(parts));
        };

        if !user.is_superuser {
            tracing::warn!(user = user.id, path = %parts.uri.path(), "superuser required");

            return Err(Template::new(Some(user)).forbidden());
        }

        Ok(SuperUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            issuer: "restomenu".to_owned(),
            audience: "restomenu-web".to_owned(),
            expiration_days: 7,
        }
    }

    #[test]
    fn test_token_roundtrip_and_tampering() {
        let config = config();
        let token = generate_token(&config, "01HZY".to_owned()).unwrap();

        assert_eq!(verify_token(&config, &token).as_deref(), Some("01HZY"));

        let mut other = config.clone();
        other.secret = "another_secret_key_minimum_32_characters".to_owned();
        assert_eq!(verify_token(&other, &token), None);

        let mut other = config.clone();
        other.audience = "someone-else".to_owned();
        assert_eq!(verify_token(&other, &token), None);

        assert_eq!(verify_token(&config, "not-a-token"), None);
    }

    #[test]
    fn test_cookie_flags() {
        let cookie = build_cookie(&config(), "01HZY".to_owned()).unwrap();

        assert_eq!(cookie.name(), AUTH_COOKIE_NAME);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_safe_next() {
        assert_eq!(safe_next(Some("/menu/create")), "/menu/create");
        assert_eq!(safe_next(Some("/menu?name=pizza")), "/menu?name=pizza");
        assert_eq!(safe_next(Some("//evil.example")), "/");
        assert_eq!(safe_next(Some("https://evil.example")), "/");
        assert_eq!(safe_next(Some("/\\evil.example")), "/");
        assert_eq!(safe_next(Some("")), "/");
        assert_eq!(safe_next(None), "/");
    }

    #[test]
    fn test_login_url() {
        assert_eq!(
            login_url("/menu/create"),
            "/users/login?next=%2Fmenu%2Fcreate"
        );
        assert_eq!(
            login_url("/menu?name=a b"),
            "/users/login?next=%2Fmenu%3Fname%3Da%20b"
        );
    }
}
