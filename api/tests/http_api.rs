use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use fishnik_api::application::ports::fishnik_repository::FishnikRepository;
use fishnik_api::application::use_cases::auth::register::Register;
use fishnik_api::bootstrap::app_context::{AppContext, AppServices};
use fishnik_api::bootstrap::config::Config;
use fishnik_api::domain::fishniks::fishnik::{Fishnik, FishnikPatch, NewFishnik};
use fishnik_api::domain::users::credentials::Credentials;
use fishnik_api::infrastructure::crypto::JwtTokenCodec;
use fishnik_api::infrastructure::memory::MemoryUserRepository;
use fishnik_api::presentation::http::build_router;

const SEED_EMAIL: &str = "seed@fishnik.test";
const SEED_PASSWORD: &str = "userOnePass";

struct TestApp {
    router: Router,
    ctx: AppContext,
    token: String,
    user_id: Uuid,
    seeded: Vec<Fishnik>,
}

impl TestApp {
    async fn spawn() -> Self {
        let cfg = Config::from_lookup(|_| None).expect("default config");
        let ctx = AppContext::new(cfg, AppServices::in_memory("integration-secret"));

        let repo = ctx.fishnik_repo();
        let mut seeded = Vec::new();
        for (name, year, orientation) in [("First fishnik", 1, true), ("Second fishnik", 2, false)] {
            let new = NewFishnik::new(Some(name.into()), Some(year), Some(orientation)).unwrap();
            seeded.push(repo.create(&new).await.unwrap());
        }

        let users = ctx.user_repo();
        let tokens = ctx.token_codec();
        let creds = Credentials::new(Some(SEED_EMAIL.into()), Some(SEED_PASSWORD.into())).unwrap();
        let session = Register {
            repo: users.as_ref(),
            tokens: tokens.as_ref(),
        }
        .execute(&creds)
        .await
        .unwrap()
        .expect("seed user is new");

        Self {
            router: build_router(ctx.clone()),
            ctx,
            token: session.token,
            user_id: session.user.id,
            seeded,
        }
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, headers, body)
    }

    async fn fishnik_count(&self) -> i64 {
        self.ctx.fishnik_repo().count().await.unwrap()
    }
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("x-auth", token);
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn creating_a_fishnik_adds_exactly_one_record() {
    let app = TestApp::spawn().await;
    let (status, _, body) = app
        .send(request(
            "POST",
            "/fishnik",
            Some(&app.token),
            Some(json!({"name": "name", "year": 4, "orientation": false})),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orientation"], json!(false));
    assert_eq!(body["year"], json!(4));
    assert_eq!(app.fishnik_count().await, 3);
    let all = app.ctx.fishnik_repo().list().await.unwrap();
    assert_eq!(all[2].name, "name");
}

#[tokio::test]
async fn blank_fishnik_is_rejected_without_side_effects() {
    let app = TestApp::spawn().await;

    let (status, _, body) = app
        .send(request("POST", "/fishnik", Some(&app.token), Some(json!({}))))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("bad_request"));

    let (status, _, _) = app
        .send(request("POST", "/fishnik", Some(&app.token), Some(json!({"name": "  "}))))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app
        .send(request("POST", "/fishnik", Some(&app.token), None))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app
        .send(request(
            "POST",
            "/fishnik",
            Some(&app.token),
            Some(json!({"name": "ok", "year": "nineteen"})),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.fishnik_count().await, 2);
}

#[tokio::test]
async fn listing_returns_seeded_records_in_order() {
    let app = TestApp::spawn().await;
    let (status, _, body) = app
        .send(request("GET", "/fishnik", Some(&app.token), None))
        .await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("array body");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], json!(app.seeded[0].name));
    assert_eq!(items[0]["orientation"], json!(true));
    assert_eq!(items[1]["name"], json!("Second fishnik"));
    assert_eq!(items[1]["year"], json!(2));
}

#[tokio::test]
async fn fetches_a_fishnik_by_id() {
    let app = TestApp::spawn().await;
    let id = app.seeded[0].id;
    let (status, _, body) = app
        .send(request("GET", &format!("/fishnik/{id}"), Some(&app.token), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("First fishnik"));
    assert_eq!(body["id"], json!(id.to_string()));

    let missing = Uuid::new_v4();
    let (status, _, _) = app
        .send(request("GET", &format!("/fishnik/{missing}"), Some(&app.token), None))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = app
        .send(request("GET", "/fishnik/123abc", Some(&app.token), None))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_removes_the_record() {
    let app = TestApp::spawn().await;
    let id = app.seeded[0].id;
    let (status, _, body) = app
        .send(request("DELETE", &format!("/fishnik/{id}"), Some(&app.token), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("First fishnik"));

    assert!(app.ctx.fishnik_repo().get_by_id(id).await.unwrap().is_none());
    assert_eq!(app.fishnik_count().await, 1);

    let (status, _, _) = app
        .send(request("DELETE", &format!("/fishnik/{id}"), Some(&app.token), None))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_changes_only_submitted_fields() {
    let app = TestApp::spawn().await;
    let id = app.seeded[0].id;
    let (status, _, body) = app
        .send(request(
            "PATCH",
            &format!("/fishnik/{id}"),
            Some(&app.token),
            Some(json!({"name": "Tupiko", "year": 5})),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Tupiko"));

    let stored = app.ctx.fishnik_repo().get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Tupiko");
    assert_eq!(stored.year, Some(5));
    assert!(stored.orientation);

    let (status, _, body) = app
        .send(request(
            "PATCH",
            &format!("/fishnik/{id}"),
            Some(&app.token),
            Some(json!({"year": null})),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], Value::Null);
    assert_eq!(body["name"], json!("Tupiko"));
}

#[tokio::test]
async fn patch_validates_and_reports_missing_records() {
    let app = TestApp::spawn().await;
    let id = app.seeded[1].id;

    let (status, _, _) = app
        .send(request(
            "PATCH",
            &format!("/fishnik/{id}"),
            Some(&app.token),
            Some(json!({"name": ""})),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = app
        .send(request("PATCH", &format!("/fishnik/{id}"), Some(&app.token), Some(json!({}))))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Second fishnik"));

    let missing = Uuid::new_v4();
    let (status, _, _) = app
        .send(request(
            "PATCH",
            &format!("/fishnik/{missing}"),
            Some(&app.token),
            Some(json!({"year": 3})),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_rejects_null_orientation() {
    let app = TestApp::spawn().await;
    let id = app.seeded[0].id;
    let (status, _, body) = app
        .send(request(
            "PATCH",
            &format!("/fishnik/{id}"),
            Some(&app.token),
            Some(json!({"orientation": null})),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("orientation must be a boolean"));

    let stored = app.ctx.fishnik_repo().get_by_id(id).await.unwrap().unwrap();
    assert!(stored.orientation);
}

#[tokio::test]
async fn oversized_body_is_payload_too_large() {
    let app = TestApp::spawn().await;
    let limit = app.ctx.cfg.body_limit_bytes;
    let name = "x".repeat(limit + 4_000);
    let (status, _, body) = app
        .send(request(
            "POST",
            "/fishnik",
            Some(&app.token),
            Some(json!({ "name": name })),
        ))
        .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], json!("payload_too_large"));
    assert_eq!(app.fishnik_count().await, 2);
}

#[tokio::test]
async fn fishnik_routes_require_a_valid_token() {
    let app = TestApp::spawn().await;
    for token in [None, Some("garbage"), Some("")] {
        let (status, _, body) = app.send(request("GET", "/fishnik", token, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], json!("unauthorized"));
    }

    let (status, _, _) = app
        .send(request("POST", "/fishnik", None, Some(json!({"name": "sneaky"}))))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.fishnik_count().await, 2);
}

#[tokio::test]
async fn me_returns_the_authenticated_user() {
    let app = TestApp::spawn().await;
    let (status, _, body) = app
        .send(request("GET", "/user/me", Some(&app.token), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], json!(SEED_EMAIL));
    assert_eq!(body["id"], json!(app.user_id.to_string()));
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let app = TestApp::spawn().await;
    let (status, _, _) = app.send(request("GET", "/user/me", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signed_token_without_stored_entry_is_rejected() {
    let app = TestApp::spawn().await;
    // Valid signature, but never recorded for the user
    let forged = app.ctx.token_codec().issue(app.user_id, "auth").unwrap();
    let (status, _, _) = app.send(request("GET", "/user/me", Some(&forged), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signup_issues_token_and_persists_user() {
    let app = TestApp::spawn().await;
    let (status, headers, body) = app
        .send(request(
            "POST",
            "/user",
            None,
            Some(json!({"email": "yuui@ghmdtu.uiyou", "password": "jzktySRY456"})),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = headers
        .get("x-auth")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(!token.is_empty());
    assert!(body["id"].as_str().is_some());
    assert!(body.get("password").is_none());

    let stored = app
        .ctx
        .user_repo()
        .find_by_email("yuui@ghmdtu.uiyou")
        .await
        .unwrap()
        .expect("user persisted");
    assert_eq!(body["id"], json!(stored.id.to_string()));
    assert_ne!(stored.password_hash.as_deref(), Some("jzktySRY456"));

    let (status, _, body) = app.send(request("GET", "/user/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], json!("yuui@ghmdtu.uiyou"));
}

#[tokio::test]
async fn signup_rejects_invalid_and_duplicate_accounts() {
    let app = TestApp::spawn().await;
    let (status, _, _) = app
        .send(request(
            "POST",
            "/user",
            None,
            Some(json!({"email": "not-an-email", "password": "longenough"})),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app
        .send(request(
            "POST",
            "/user",
            None,
            Some(json!({"email": "short@pass.io", "password": "abc"})),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = app
        .send(request(
            "POST",
            "/user",
            None,
            Some(json!({"email": SEED_EMAIL, "password": "whatever1"})),
        ))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], json!("conflict"));
}

#[tokio::test]
async fn login_returns_token_and_email() {
    let app = TestApp::spawn().await;
    let (status, headers, body) = app
        .send(request(
            "GET",
            "/user/login",
            None,
            Some(json!({"email": SEED_EMAIL, "password": SEED_PASSWORD})),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], json!(SEED_EMAIL));
    let token = headers.get("x-auth").expect("token header");
    assert_ne!(token.to_str().unwrap(), app.token);

    let count = app.ctx.user_repo().count_tokens(app.user_id).await.unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn login_accepts_post() {
    let app = TestApp::spawn().await;
    let (status, headers, body) = app
        .send(request(
            "POST",
            "/user/login",
            None,
            Some(json!({"email": SEED_EMAIL, "password": SEED_PASSWORD})),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(app.user_id.to_string()));
    let token = headers
        .get("x-auth")
        .and_then(|v| v.to_str().ok())
        .expect("token header")
        .to_string();

    let (status, _, body) = app.send(request("GET", "/user/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], json!(SEED_EMAIL));
}

#[tokio::test]
async fn login_with_bad_credentials_is_unauthorized() {
    let app = TestApp::spawn().await;
    for (email, password) in [(SEED_EMAIL, "wrong-password"), ("nobody@fishnik.test", SEED_PASSWORD)] {
        let (status, headers, _) = app
            .send(request(
                "GET",
                "/user/login",
                None,
                Some(json!({"email": email, "password": password})),
            ))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(headers.get("x-auth").is_none());
    }
}

#[tokio::test]
async fn logout_removes_the_presented_token() {
    let app = TestApp::spawn().await;
    let (status, _, _) = app
        .send(request("DELETE", "/user/logout", Some(&app.token), None))
        .await;
    assert_eq!(status, StatusCode::OK);

    let count = app.ctx.user_repo().count_tokens(app.user_id).await.unwrap();
    assert_eq!(count, 0);

    let (status, _, _) = app
        .send(request("GET", "/user/me", Some(&app.token), None))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_and_openapi_are_public() {
    let app = TestApp::spawn().await;
    let (status, _, body) = app.send(request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));

    let (status, _, body) = app.send(request("GET", "/openapi.json", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/fishnik/{id}"].is_object());
}

struct UnreachableFishnikStore;

#[async_trait]
impl FishnikRepository for UnreachableFishnikStore {
    async fn create(&self, _new: &NewFishnik) -> anyhow::Result<Fishnik> {
        anyhow::bail!("store unreachable")
    }

    async fn list(&self) -> anyhow::Result<Vec<Fishnik>> {
        anyhow::bail!("store unreachable")
    }

    async fn get_by_id(&self, _id: Uuid) -> anyhow::Result<Option<Fishnik>> {
        anyhow::bail!("store unreachable")
    }

    async fn delete(&self, _id: Uuid) -> anyhow::Result<Option<Fishnik>> {
        anyhow::bail!("store unreachable")
    }

    async fn update(&self, _id: Uuid, _patch: &FishnikPatch) -> anyhow::Result<Option<Fishnik>> {
        anyhow::bail!("store unreachable")
    }

    async fn count(&self) -> anyhow::Result<i64> {
        anyhow::bail!("store unreachable")
    }
}

#[tokio::test]
async fn health_reports_degraded_when_store_fails() {
    let cfg = Config::from_lookup(|_| None).expect("default config");
    let services = AppServices::new(
        Arc::new(MemoryUserRepository::new()),
        Arc::new(UnreachableFishnikStore),
        Arc::new(JwtTokenCodec::new("integration-secret")),
    );
    let router = build_router(AppContext::new(cfg, services));

    let res = router
        .oneshot(request("GET", "/health", None, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], json!("degraded"));
}
