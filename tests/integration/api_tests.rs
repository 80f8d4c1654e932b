//! API integration tests driving the router in-process

use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Request, StatusCode,
    },
    Router,
};
use mockall::mock;
use rand::rngs::OsRng;
use serde_json::{json, Value};
use tower::ServiceExt;

use library_server::{
    api::create_router,
    config::{AccountConfig, AppConfig, StorageBackend},
    error::{AppError, AppResult},
    models::{Author, Genre, GenreInput, Role, UserClaims},
    repository::{memory::MemoryStore, Repository, ResourceStore},
    AppState,
};

const SECRET: &str = "integration-secret";

mock! {
    pub GenreStore {}

    #[async_trait]
    impl ResourceStore<Genre> for GenreStore {
        async fn insert(&self, input: &GenreInput) -> AppResult<Genre>;
        async fn find_by_id(&self, id: i64) -> AppResult<Option<Genre>>;
        async fn find_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Genre>>;
        async fn update(&self, id: i64, input: &GenreInput) -> AppResult<bool>;
        async fn delete(&self, id: i64) -> AppResult<bool>;
    }
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = SECRET.to_string();
    config.database.backend = StorageBackend::Memory;
    config
}

fn app() -> Router {
    create_router(AppState::new(test_config(), Repository::in_memory()))
}

fn app_with_genre_store(store: MockGenreStore) -> Router {
    let repository =
        Repository::from_stores(Arc::new(store), Arc::new(MemoryStore::<Author>::new()));
    create_router(AppState::new(test_config(), repository))
}

fn token(roles: &[Role]) -> String {
    UserClaims::new("tester", roles.to_vec(), 1)
        .create_token(SECRET)
        .expect("Failed to create token")
}

fn admin() -> String {
    token(&[Role::Admin])
}

fn user() -> String {
    token(&[Role::User])
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("Failed to build request"))
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, value)
}

async fn create_genre(app: &Router, name: &str) -> i64 {
    let (status, body) = send(app, "POST", "/genres", Some(&admin()), Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_i64().expect("No genre ID")
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("Expected a JSON array")
        .iter()
        .map(|g| g["id"].as_i64().expect("No ID"))
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();

    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_genre_lifecycle() {
    let app = app();
    let id = create_genre(&app, "Fantasy").await;
    assert_eq!(id, 1);

    let (status, body) = send(&app, "GET", "/genres/1", Some(&user()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 1, "name": "Fantasy" }));

    let (status, body) = send(&app, "PUT", "/genres/1", Some(&admin()), Some(json!({ "name": "High fantasy" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (_, body) = send(&app, "GET", "/genres/1", Some(&admin()), None).await;
    assert_eq!(body["name"], "High fantasy");

    let (status, body) = send(&app, "DELETE", "/genres/1", Some(&admin()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    // A repeated delete is an error, not a no-op
    let (status, _) = send(&app, "DELETE", "/genres/1", Some(&admin()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/genres/1", Some(&user()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Genre 1 not found");
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let app = app();
    create_genre(&app, "Drama").await;

    let (status, _) = send(&app, "GET", "/genres/99", Some(&user()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PUT", "/genres/99", Some(&admin()), Some(json!({ "name": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/genres/99", Some(&admin()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_pages_and_empty_page() {
    let app = app();
    for name in ["One", "Two", "Three"] {
        create_genre(&app, name).await;
    }
    let (status, _) = send(&app, "DELETE", "/genres/2", Some(&admin()), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/genres?page=0&limit=10", Some(&user()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 3]);

    let (status, body) = send(&app, "GET", "/genres?page=1&limit=1", Some(&user()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![3]);

    // Past the last populated page
    let (status, body) = send(&app, "GET", "/genres?page=1&limit=10", Some(&user()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchData");
}

#[tokio::test]
async fn test_sequential_pages_cover_collection() {
    let app = app();
    for i in 0..7 {
        create_genre(&app, &format!("Genre {}", i)).await;
    }

    let mut seen = Vec::new();
    for page in 0..3 {
        let uri = format!("/genres?page={}&limit=3", page);
        let (status, body) = send(&app, "GET", &uri, Some(&user()), None).await;
        assert_eq!(status, StatusCode::OK);
        seen.extend(ids(&body));
    }
    assert_eq!(seen, (1..=7).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_page_parameters_are_validated() {
    let app = app();
    create_genre(&app, "Drama").await;

    let (status, body) = send(&app, "GET", "/genres?page=0", Some(&user()), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "limit");

    let (status, _) = send(&app, "GET", "/genres", Some(&user()), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/genres?page=-1&limit=5", Some(&user()), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/genres?page=0&limit=0", Some(&user()), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/genres?page=abc&limit=5", Some(&user()), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_non_positive_ids_never_reach_the_store() {
    // No expectations: any store call panics the test
    let app = app_with_genre_store(MockGenreStore::new());

    for id in ["0", "-3"] {
        let uri = format!("/genres/{}", id);

        let (status, body) = send(&app, "GET", &uri, Some(&user()), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"][0]["field"], "id");
        assert_eq!(body["fields"][0]["message"], "Value must be higher than 0");

        let (status, _) = send(&app, "PUT", &uri, Some(&admin()), Some(json!({ "name": "Drama" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "DELETE", &uri, Some(&admin()), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _) = send(&app, "GET", "/genres/abc", Some(&user()), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_body_never_reaches_the_store() {
    let app = app_with_genre_store(MockGenreStore::new());

    let (status, body) = send(&app, "POST", "/genres", Some(&admin()), Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "name");

    let (status, _) = send(&app, "POST", "/genres", Some(&admin()), Some(json!({ "title": "Drama" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_page_offset_is_page_times_limit() {
    let mut store = MockGenreStore::new();
    store
        .expect_find_page()
        .withf(|offset, limit| *offset == 20 && *limit == 10)
        .times(1)
        .returning(|_, _| Ok(vec![Genre { id: 21, name: "Satire".to_string() }]));

    let app = app_with_genre_store(store);
    let (status, body) = send(&app, "GET", "/genres?page=2&limit=10", Some(&user()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![21]);
}

#[tokio::test]
async fn test_store_failures_are_server_errors() {
    let mut store = MockGenreStore::new();
    store
        .expect_find_by_id()
        .returning(|_| Err(AppError::Internal("connection reset".to_string())));

    let app = app_with_genre_store(store);
    let (status, body) = send(&app, "GET", "/genres/1", Some(&user()), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
}

#[tokio::test]
async fn test_unauthorized_access() {
    let app = app();

    let (status, _) = send(&app, "GET", "/genres/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/genres/1", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mutations_require_admin_regardless_of_input() {
    let app = app_with_genre_store(MockGenreStore::new());
    let user = user();

    let (status, _) = send(&app, "POST", "/genres", Some(&user), Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "POST", "/genres", Some(&user), Some(json!({ "name": "Drama" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "PUT", "/genres/0", Some(&user), Some(json!({}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", "/genres/abc", Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_reads_require_user_or_admin() {
    let app = app_with_genre_store(MockGenreStore::new());
    let nobody = token(&[]);

    let (status, body) = send(&app, "GET", "/genres/0", Some(&nobody), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "NotAuthorized");

    let (status, _) = send(&app, "GET", "/genres", Some(&nobody), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_authors_share_the_contract() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/authors",
        Some(&admin()),
        Some(json!({ "first_name": "Ursula", "last_name": "Le Guin" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 1, "first_name": "Ursula", "last_name": "Le Guin" }));

    let (status, body) = send(
        &app,
        "PUT",
        "/authors/1",
        Some(&admin()),
        Some(json!({ "first_name": "Ursula K.", "last_name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "last_name");

    let (status, body) = send(&app, "GET", "/authors?page=0&limit=5", Some(&user()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1]);

    let (status, _) = send(&app, "DELETE", "/authors/1", Some(&user()), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login() {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(b"librarian-pass", &salt)
        .expect("Failed to hash password")
        .to_string();

    let mut config = test_config();
    config.auth.accounts.push(AccountConfig {
        username: "librarian".to_string(),
        password_hash: hash,
        roles: vec![Role::Admin],
    });
    let app = create_router(AppState::new(config, Repository::in_memory()));

    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": "librarian", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": "librarian", "password": "librarian-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    let token = body["token"].as_str().expect("No token in response").to_string();

    let (status, _) = send(&app, "POST", "/genres", Some(&token), Some(json!({ "name": "Essay" }))).await;
    assert_eq!(status, StatusCode::OK);
}
