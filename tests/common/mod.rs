#![allow(dead_code)]

use std::io::Cursor;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use restomenu::config::{
    Config, DatabaseConfig, JwtConfig, MediaConfig, ObservabilityConfig, RootConfig, ServerConfig,
};
use restomenu_user::{RegisterInput, User};
use temp_dir::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "restomenu-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub state: restomenu_shared::State,
    pub config: Config,
    pub dir: TempDir,
}

pub async fn setup_test_app() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.child("db.sqlite3").to_string_lossy());
    let pool = restomenu::create_pool(&url, 1).await?;
    restomenu::migrate(&pool).await?;

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 8000,
        },
        database: DatabaseConfig {
            url,
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            issuer: "restomenu".to_owned(),
            audience: "restomenu-web".to_owned(),
            expiration_days: 7,
        },
        media: MediaConfig {
            root: dir.child("media").to_string_lossy().to_string(),
        },
        root: RootConfig::default(),
        observability: ObservabilityConfig::default(),
    };

    let state = restomenu_shared::State::single(pool);
    let router = restomenu::router(restomenu::AppState::new(config.clone(), state.clone()));

    Ok(TestApp {
        router,
        state,
        config,
        dir,
    })
}

impl TestApp {
    pub fn user_command(&self) -> restomenu_user::Command {
        restomenu_user::Command(self.state.clone())
    }

    pub fn meal_query(&self) -> restomenu_meal::meal::Query {
        restomenu_meal::meal::Query(self.state.read_db.clone())
    }

    pub fn cook_query(&self) -> restomenu_meal::cook::Query {
        restomenu_meal::cook::Query(self.state.read_db.clone())
    }

    pub async fn create_user(&self, username: &str, is_superuser: bool) -> anyhow::Result<User> {
        let id = self
            .user_command()
            .register(RegisterInput {
                username: username.to_owned(),
                email: None,
                password: "my_password".to_owned(),
                password_confirm: "my_password".to_owned(),
                is_superuser,
            })
            .await?;

        self.user_command()
            .find(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("user not found"))
    }

    pub async fn create_category(&self, name: &str) -> anyhow::Result<String> {
        Ok(restomenu_meal::category::Command(self.state.clone())
            .create(restomenu_meal::category::CategoryInput {
                name: name.to_owned(),
            })
            .await?)
    }

    /// `Cookie` header value authenticating `user`.
    pub fn cookie(&self, user: &User) -> String {
        let cookie = restomenu::auth::build_cookie(&self.config.jwt, user.id.to_owned()).unwrap();

        format!("{}={}", cookie.name(), cookie.value())
    }

    pub async fn get(&self, uri: &str, user: Option<&User>) -> Response<Body> {
        let mut request = Request::get(uri);
        if let Some(user) = user {
            request = request.header(header::COOKIE, self.cookie(user));
        }

        self.router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(
        &self,
        uri: &str,
        user: Option<&User>,
        fields: &[(&str, &str)],
    ) -> Response<Body> {
        let mut request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(user) = user {
            request = request.header(header::COOKIE, self.cookie(user));
        }

        let body = serde_urlencoded::to_string(fields).unwrap();

        self.router
            .clone()
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_multipart(
        &self,
        uri: &str,
        user: Option<&User>,
        fields: &[(&str, &str)],
        image: Option<Vec<u8>>,
    ) -> Response<Body> {
        let mut request = Request::post(uri).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(user) = user {
            request = request.header(header::COOKIE, self.cookie(user));
        }

        self.router
            .clone()
            .oneshot(
                request
                    .body(Body::from(multipart_body(fields, image)))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

pub fn multipart_body(fields: &[(&str, &str)], image: Option<Vec<u8>>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some(image) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"test_image.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(&image);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    body
}

pub fn png() -> Vec<u8> {
    let mut data = Cursor::new(Vec::new());
    image::RgbImage::new(4, 4)
        .write_to(&mut data, image::ImageFormat::Png)
        .unwrap();

    data.into_inner()
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_owned())
        .unwrap_or_default()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    String::from_utf8(bytes.to_vec()).unwrap()
}
