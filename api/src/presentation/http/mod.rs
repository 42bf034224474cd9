pub mod auth;
pub mod error;
pub mod fishniks;
pub mod health;
pub mod users;

use axum::Router;
use axum::extract::{DefaultBodyLimit, MatchedPath};
use http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;

#[derive(OpenApi)]
#[openapi(
        paths(
            users::signup,
            users::login,
            users::logout,
            users::me,
            fishniks::create_fishnik,
            fishniks::list_fishniks,
            fishniks::get_fishnik,
            fishniks::delete_fishnik,
            fishniks::update_fishnik,
            health::health,
        ),
        components(schemas(
            users::SignupRequest,
            users::LoginRequest,
            users::UserResponse,
            fishniks::Fishnik,
            fishniks::CreateFishnikRequest,
            fishniks::UpdateFishnikRequest,
            health::HealthResp,
            error::ErrorBody,
        )),
        modifiers(&TokenHeaderScheme),
        security(("x_auth" = [])),
        tags(
            (name = "Users", description = "Accounts and sessions"),
            (name = "Fishniks", description = "Fishnik records"),
            (name = "Health", description = "System health checks")
        )
    )]
pub struct ApiDoc;

struct TokenHeaderScheme;

impl Modify for TokenHeaderScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "x_auth",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(auth::AUTH_HEADER))),
            );
        }
    }
}

fn cors_layer(cfg: &Config) -> CorsLayer {
    let token_header = HeaderName::from_static(auth::AUTH_HEADER);
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, token_header.clone()])
        .expose_headers([token_header]);

    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin),
        // FRONTEND_URL is mandatory in production; an unparsable one denies everything
        _ if cfg.is_production => base.allow_origin(AllowOrigin::exact(HeaderValue::from_static(
            "http://invalid",
        ))),
        _ => base.allow_origin(AllowOrigin::mirror_request()),
    }
}

/// The complete HTTP surface, shared by `main` and the integration tests.
pub fn build_router(ctx: AppContext) -> Router {
    let cfg = ctx.cfg.clone();
    Router::new()
        .merge(health::routes(ctx.clone()))
        .merge(users::routes(ctx.clone()))
        .merge(fishniks::routes(ctx))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(DefaultBodyLimit::max(cfg.body_limit_bytes))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        )
}
