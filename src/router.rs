use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::rate_limit::{RateLimit, rate_limit_middleware};
use crate::modules::announcements::init_announcements_router;
use crate::modules::applications::{
    init_application_review_router, init_applications_router, init_payments_router,
};
use crate::modules::auth::router::init_auth_router;
use crate::modules::messages::init_messages_router;
use crate::modules::parents::init_parent_router;
use crate::modules::reports::{init_headmaster_router, init_reports_router};
use crate::modules::students::router::init_students_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Json, Router, middleware, routing::get};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

pub fn init_router(state: AppState) -> Router {
    let trust_forwarded_for = state.rate_limit_config.trust_forwarded_for;
    let general_limit = RateLimit::new(
        "general",
        state.rate_limit_config.general_quota(),
        trust_forwarded_for,
    );
    let auth_limit = RateLimit::new(
        "auth",
        state.rate_limit_config.auth_quota(),
        trust_forwarded_for,
    );

    let openapi = ApiDoc::openapi();

    Router::new()
        .route(
            "/api-docs/openapi.json",
            get({
                let openapi = openapi.clone();
                move || {
                    let openapi = openapi.clone();
                    async move { Json(openapi) }
                }
            }),
        )
        .merge(Scalar::with_url("/scalar", openapi))
        .nest(
            "/api",
            Router::new()
                .nest(
                    "/auth",
                    init_auth_router().route_layer(middleware::from_fn_with_state(
                        auth_limit,
                        rate_limit_middleware,
                    )),
                )
                .nest(
                    "/applications",
                    init_applications_router().route_layer(middleware::from_fn_with_state(
                        general_limit.clone(),
                        rate_limit_middleware,
                    )),
                )
                .nest(
                    "/payments",
                    init_payments_router().route_layer(middleware::from_fn_with_state(
                        general_limit,
                        rate_limit_middleware,
                    )),
                )
                .nest(
                    "/secretary",
                    init_application_review_router()
                        .merge(init_students_router())
                        .merge(init_reports_router())
                        .merge(init_announcements_router())
                        .merge(init_messages_router()),
                )
                .nest("/headmaster", init_headmaster_router())
                .nest("/parent", init_parent_router())
                .route_layer(middleware::from_fn(metrics_middleware)),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
