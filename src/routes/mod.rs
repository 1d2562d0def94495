pub mod health;
pub mod view;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        view::get_view,
        view::select_window,
        view::refresh,
    ),
    components(
        schemas(
            view::ViewResponse,
            crate::plant_api::Reading,
            crate::plant_api::WindowSelector,
            crate::view::format::ChartPoint,
            crate::view::format::WindowButton,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "view", description = "Chart state and window selection"),
    ),
    info(
        title = "Plant Monitor",
        description = "Soil moisture dashboard backed by the plant data service",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/view", get(view::get_view))
        .route("/window/{selector}", post(view::select_window))
        .route("/refresh", post(view::refresh))
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
