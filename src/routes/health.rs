use axum::http::StatusCode;

/// Health check endpoint
///
/// Returns 200 OK while the presentation server is running, independent of
/// whether the data service is reachable.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "health"
)]
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
