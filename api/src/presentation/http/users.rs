use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
    middleware,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::auth::Session;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::logout::Logout;
use crate::application::use_cases::auth::register::Register;
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::credentials::Credentials;
use crate::presentation::http::auth::{self, AuthUser};
use crate::presentation::http::error::ApiError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
}

impl From<AuthUser> for UserResponse {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

fn session_response(session: Session) -> Result<(HeaderMap, Json<UserResponse>), ApiError> {
    let headers = auth::token_header(&session.token)?;
    Ok((
        headers,
        Json(UserResponse {
            id: session.user.id,
            email: session.user.email,
        }),
    ))
}

pub fn routes(ctx: AppContext) -> Router {
    let protected = Router::new()
        .route("/user/me", get(me))
        .route("/user/logout", delete(logout))
        .route_layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::authenticate,
        ));

    Router::new()
        .route("/user", post(signup))
        .route("/user/login", get(login).post(login))
        .merge(protected)
        .with_state(ctx)
}

#[utoipa::path(post, path = "/user", tag = "Users", request_body = SignupRequest, security(()), responses(
    (status = 200, body = UserResponse, headers(("x-auth" = String, description = "Session token"))),
    (status = 400, body = ErrorBody),
    (status = 409, body = ErrorBody)
))]
pub async fn signup(
    State(ctx): State<AppContext>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<UserResponse>), ApiError> {
    let Json(req) = body?;
    let creds = Credentials::new(req.email, req.password)?;

    let repo = ctx.user_repo();
    let tokens = ctx.token_codec();
    let uc = Register {
        repo: repo.as_ref(),
        tokens: tokens.as_ref(),
    };
    let session = uc
        .execute(&creds)
        .await?
        .ok_or_else(|| ApiError::Conflict(format!("{} is already registered", creds.email)))?;
    tracing::info!(user_id = %session.user.id, "user_signed_up");
    session_response(session)
}

#[utoipa::path(get, path = "/user/login", tag = "Users", request_body = LoginRequest, security(()), responses(
    (status = 200, body = UserResponse, headers(("x-auth" = String, description = "Session token"))),
    (status = 401, body = ErrorBody)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<UserResponse>), ApiError> {
    let Json(req) = body?;
    let repo = ctx.user_repo();
    let tokens = ctx.token_codec();
    let uc = LoginUc {
        repo: repo.as_ref(),
        tokens: tokens.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    let session = uc.execute(&dto).await?.ok_or(ApiError::Unauthorized)?;
    tracing::info!(user_id = %session.user.id, "user_logged_in");
    session_response(session)
}

#[utoipa::path(delete, path = "/user/logout", tag = "Users", responses(
    (status = 200),
    (status = 401, body = ErrorBody)
))]
pub async fn logout(
    State(ctx): State<AppContext>,
    Extension(user): Extension<AuthUser>,
) -> Result<(), ApiError> {
    let repo = ctx.user_repo();
    let uc = Logout {
        repo: repo.as_ref(),
    };
    if !uc.execute(user.id, &user.token).await? {
        // Revoked concurrently between the middleware lookup and now
        return Err(ApiError::Unauthorized);
    }
    tracing::info!(user_id = %user.id, "user_logged_out");
    Ok(())
}

#[utoipa::path(get, path = "/user/me", tag = "Users", responses(
    (status = 200, body = UserResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn me(Extension(user): Extension<AuthUser>) -> Json<UserResponse> {
    Json(user.into())
}
