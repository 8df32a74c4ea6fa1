use axum::{
    body::Body,
    extract::Request,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;
use std::{convert::Infallible, future::Future, pin::Pin};
use tower::Service;

#[derive(RustEmbed)]
#[folder = "static/"]
#[prefix = "/"]
struct Assets;

/// Serves the stylesheets and images compiled into the binary.
#[derive(Default, Clone)]
pub struct AssetsService;

impl AssetsService {
    pub fn new() -> Self {
        Self
    }
}

fn asset_response(path: &str) -> Response {
    let Some(content) = Assets::get(path) else {
        return (StatusCode::NOT_FOUND, "404 Not Found").into_response();
    };

    let mime = mime_guess::from_path(path).first_or_octet_stream();

    (
        [(header::CONTENT_TYPE, mime.as_ref().to_owned())],
        Body::from(content.data),
    )
        .into_response()
}

impl Service<Request> for AssetsService {
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let path = req.uri().path().to_owned();

        Box::pin(async move { Ok(asset_response(&path)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_response() {
        let response = asset_response("/css/main.css");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css"
        );

        let response = asset_response("/css/missing.css");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
