use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    middleware,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::fishniks::create_fishnik::CreateFishnik;
use crate::application::use_cases::fishniks::delete_fishnik::DeleteFishnik;
use crate::application::use_cases::fishniks::get_fishnik::GetFishnik;
use crate::application::use_cases::fishniks::list_fishniks::ListFishniks;
use crate::application::use_cases::fishniks::update_fishnik::UpdateFishnik;
use crate::bootstrap::app_context::AppContext;
use crate::domain::fishniks::fishnik::{self as domain, FishnikPatch, NewFishnik};
use crate::presentation::http::auth;
use crate::presentation::http::error::ApiError;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Fishnik {
    pub id: Uuid,
    pub name: String,
    pub year: Option<i32>,
    pub orientation: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<domain::Fishnik> for Fishnik {
    fn from(f: domain::Fishnik) -> Self {
        Self {
            id: f.id,
            name: f.name,
            year: f.year,
            orientation: f.orientation,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFishnikRequest {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub orientation: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateFishnikRequest {
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub name: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<i32>)]
    pub year: DoubleOption<i32>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<bool>)]
    pub orientation: DoubleOption<bool>,
}

/// Distinguishes a field missing from the body from one explicitly set to null.
#[derive(Debug, Clone)]
pub enum DoubleOption<T> {
    NotProvided,
    Null,
    Some(T),
}

impl<T> DoubleOption<T> {
    fn provided(self) -> Option<Option<T>> {
        match self {
            DoubleOption::NotProvided => None,
            DoubleOption::Null => Some(None),
            DoubleOption::Some(v) => Some(Some(v)),
        }
    }
}

fn deserialize_double_option<'de, D, T>(deserializer: D) -> Result<DoubleOption<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|opt| match opt {
        None => DoubleOption::Null,
        Some(value) => DoubleOption::Some(value),
    })
}

impl<T> Default for DoubleOption<T> {
    fn default() -> Self {
        DoubleOption::NotProvided
    }
}

impl TryFrom<UpdateFishnikRequest> for FishnikPatch {
    type Error = domain::FishnikError;

    fn try_from(req: UpdateFishnikRequest) -> Result<Self, Self::Error> {
        let mut patch = FishnikPatch::default();
        if let Some(name) = req.name.provided() {
            patch = patch.with_name(name)?;
        }
        if let Some(year) = req.year.provided() {
            patch = patch.with_year(year);
        }
        if let Some(orientation) = req.orientation.provided() {
            patch = patch.with_orientation(orientation)?;
        }
        Ok(patch)
    }
}

// Ids that do not parse cannot name an existing record
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/fishnik", get(list_fishniks).post(create_fishnik))
        .route(
            "/fishnik/:id",
            get(get_fishnik)
                .delete(delete_fishnik)
                .patch(update_fishnik),
        )
        .route_layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::authenticate,
        ))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/fishnik", tag = "Fishniks", request_body = CreateFishnikRequest, responses(
    (status = 200, body = Fishnik),
    (status = 400, body = ErrorBody),
    (status = 401, body = ErrorBody),
    (status = 413, body = ErrorBody)
))]
pub async fn create_fishnik(
    State(ctx): State<AppContext>,
    body: Result<Json<CreateFishnikRequest>, JsonRejection>,
) -> Result<Json<Fishnik>, ApiError> {
    let Json(req) = body?;
    let new = NewFishnik::new(req.name, req.year, req.orientation)?;

    let repo = ctx.fishnik_repo();
    let uc = CreateFishnik {
        repo: repo.as_ref(),
    };
    let fishnik = uc.execute(&new).await?;
    tracing::info!(fishnik_id = %fishnik.id, "fishnik_created");
    Ok(Json(fishnik.into()))
}

#[utoipa::path(get, path = "/fishnik", tag = "Fishniks", responses(
    (status = 200, body = [Fishnik]),
    (status = 401, body = ErrorBody)
))]
pub async fn list_fishniks(State(ctx): State<AppContext>) -> Result<Json<Vec<Fishnik>>, ApiError> {
    let repo = ctx.fishnik_repo();
    let uc = ListFishniks {
        repo: repo.as_ref(),
    };
    let items = uc.execute().await?;
    Ok(Json(items.into_iter().map(Fishnik::from).collect()))
}

#[utoipa::path(get, path = "/fishnik/{id}", tag = "Fishniks",
    params(("id" = Uuid, Path, description = "Fishnik ID")),
    responses(
        (status = 200, body = Fishnik),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn get_fishnik(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Fishnik>, ApiError> {
    let id = parse_id(&id)?;
    let repo = ctx.fishnik_repo();
    let uc = GetFishnik {
        repo: repo.as_ref(),
    };
    let fishnik = uc.execute(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(fishnik.into()))
}

#[utoipa::path(delete, path = "/fishnik/{id}", tag = "Fishniks",
    params(("id" = Uuid, Path, description = "Fishnik ID")),
    responses(
        (status = 200, body = Fishnik),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn delete_fishnik(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Fishnik>, ApiError> {
    let id = parse_id(&id)?;
    let repo = ctx.fishnik_repo();
    let uc = DeleteFishnik {
        repo: repo.as_ref(),
    };
    let removed = uc.execute(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(removed.into()))
}

#[utoipa::path(patch, path = "/fishnik/{id}", tag = "Fishniks", request_body = UpdateFishnikRequest,
    params(("id" = Uuid, Path, description = "Fishnik ID")),
    responses(
        (status = 200, body = Fishnik),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 413, body = ErrorBody)
    ))]
pub async fn update_fishnik(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    body: Result<Json<UpdateFishnikRequest>, JsonRejection>,
) -> Result<Json<Fishnik>, ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = body?;
    let patch = FishnikPatch::try_from(req)?;

    let repo = ctx.fishnik_repo();
    let uc = UpdateFishnik {
        repo: repo.as_ref(),
    };
    let fishnik = uc
        .execute(id, &patch)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(fishnik.into()))
}
