use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::application::ports::token_codec::AUTH_ACCESS;
use crate::application::use_cases::auth::authenticate::Authenticate;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::ApiError;

/// Header carrying the session token, on requests and on signup/login responses.
pub const AUTH_HEADER: &str = "x-auth";

/// Identity attached to the request by [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

pub async fn authenticate(
    State(ctx): State<AppContext>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers())?.to_string();

    let repo = ctx.user_repo();
    let tokens = ctx.token_codec();
    let uc = Authenticate {
        repo: repo.as_ref(),
        tokens: tokens.as_ref(),
    };
    let user = match uc.execute(&token, AUTH_ACCESS).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(ApiError::Unauthorized),
        Err(e) => {
            tracing::warn!(error = ?e, "token_lookup_failed");
            return Err(ApiError::Unauthorized);
        }
    };

    req.extensions_mut().insert(AuthUser {
        id: user.id,
        email: user.email,
        token,
    });
    Ok(next.run(req).await)
}

fn extract_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let token = headers
        .get(AUTH_HEADER)
        .ok_or(ApiError::Unauthorized)?
        .to_str()
        .map_err(|_| ApiError::Unauthorized)?
        .trim();
    if token.is_empty() {
        return Err(ApiError::Unauthorized);
    }
    Ok(token)
}

pub(crate) fn token_header(token: &str) -> Result<HeaderMap, ApiError> {
    let value = HeaderValue::from_str(token)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("token is not a valid header: {e}")))?;
    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(AUTH_HEADER), value);
    Ok(headers)
}
