use axum::http::StatusCode as HttpStatusCode;
use axum::response::IntoResponse;

use super::json_response;

pub(super) async fn welcome_handler() -> impl IntoResponse {
    let body = r#"{"message":"Welcome to the storefront API, see products and orders resources."}"#;
    json_response(HttpStatusCode::OK, body.to_string())
}
