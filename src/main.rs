mod adapters;
mod application;
mod domain;
mod services;

use std::sync::Arc;

use adapters::{
    controllers::{
        file_controller::FileController, health_controller::HealthController,
        login_controller::LoginController, user_controller::UserController,
    },
    middleware::require_bearer_token,
    repositories::{PgFileRepository, PgUserRepository},
    state::AppState,
};
use application::repositories::{
    file_repository::FileRepository, user_repository::UserRepository,
};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
    Router,
};
use domain::config::app::AppConfig;
use services::{BcryptPasswordService, JwtTokenService};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

fn cors_layer(config: &AppConfig) -> CorsLayer {
    match &config.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins: Vec<HeaderValue> = allowed_origins
                .iter()
                .map(|origin| origin.parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    }
}

fn build_router(app_state: AppState) -> Router {
    // Routes that require a bearer token
    let protected_routes = Router::new()
        .route(
            "/api/user",
            post(UserController::create_user),
        )
        .route("/api/user/one", get(UserController::get_current_user))
        .route("/api/user/count", get(UserController::count_users))
        .route("/api/user/password", put(UserController::change_password))
        .route(
            "/api/user/{id}",
            put(UserController::update_user).delete(UserController::delete_user),
        )
        .route(
            "/api/file",
            get(FileController::get_files).post(FileController::upload_file),
        )
        .route("/api/file/count", get(FileController::count_files))
        .route("/api/file/type", get(FileController::get_file_types))
        .route(
            "/api/file/{id}",
            get(FileController::download_file)
                .put(FileController::update_file)
                .delete(FileController::delete_file),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_bearer_token,
        ));

    let public_routes = Router::new()
        .route("/api/health", get(HealthController::health_check))
        .route("/api/login", post(LoginController::login))
        .route("/api/signup", post(UserController::signup))
        .route("/api/user", get(UserController::get_users));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(DefaultBodyLimit::max(app_state.config.max_upload_bytes))
        .layer(cors_layer(&app_state.config))
        .with_state(app_state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| panic!("ERROR: {}", e));

    tracing::info!(
        "Starting filehub-service with {} storage",
        config.storage.provider.as_str()
    );

    tracing::info!("Connecting to database...");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await
        .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("ERROR: Failed to apply database migrations");
    tracing::info!("Database ready");

    let storage_service = services::create_storage_service(&config.storage)
        .expect("Failed to create storage service");

    let port = config.port;
    let app_state = AppState {
        user_repository: Arc::new(PgUserRepository::new(pool.clone())) as Arc<dyn UserRepository>,
        file_repository: Arc::new(PgFileRepository::new(pool)) as Arc<dyn FileRepository>,
        storage_service,
        token_service: Arc::new(JwtTokenService::new(
            &config.jwt_secret,
            config.token_ttl_seconds,
        )),
        password_service: Arc::new(BcryptPasswordService::new(config.bcrypt_cost)),
        config: Arc::new(config),
    };

    let router = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::models::identity::TokenSubject;

    fn request(method: Method, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(body).unwrap()
    }

    fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut request = request(method, uri, token, Body::from(body.to_string()));
        request.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        request
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn signup(router: &Router, username: &str, password: &str) -> Value {
        let response = router
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/signup",
                None,
                json!({ "username": username, "password": password }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn protected_routes_reject_missing_or_garbage_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _) = AppState::for_tests(dir.path());
        let router = build_router(state);

        let protected = [
            (Method::POST, "/api/user"),
            (Method::PUT, "/api/user/1"),
            (Method::DELETE, "/api/user/1"),
            (Method::PUT, "/api/user/password"),
            (Method::GET, "/api/user/one"),
            (Method::GET, "/api/user/count"),
            (Method::GET, "/api/file"),
            (Method::POST, "/api/file"),
            (Method::GET, "/api/file/1"),
            (Method::PUT, "/api/file/1"),
            (Method::DELETE, "/api/file/1"),
            (Method::GET, "/api/file/count"),
            (Method::GET, "/api/file/type"),
        ];

        for (method, uri) in protected {
            for token in [None, Some("not.a.token")] {
                let response = router
                    .clone()
                    .oneshot(request(method.clone(), uri, token, Body::empty()))
                    .await
                    .unwrap();

                assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{} {}", method, uri);
                assert_eq!(
                    body_json(response).await,
                    json!({ "error": "token missing or invalid" })
                );
            }
        }
    }

    #[tokio::test]
    async fn user_listing_is_public_but_creation_is_not() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _) = AppState::for_tests(dir.path());
        let router = build_router(state);

        let response = router
            .clone()
            .oneshot(request(Method::GET, "/api/user", None, Body::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));

        let response = router
            .oneshot(json_request(
                Method::POST,
                "/api/user",
                None,
                json!({ "username": "bob" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn signed_up_user_logs_in_and_reaches_protected_routes() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _) = AppState::for_tests(dir.path());
        let router = build_router(state);
        signup(&router, "alice", "pw").await;

        let response = router
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/login",
                None,
                json!({ "username": "alice", "password": "pw" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let login = body_json(response).await;
        let token = login["token"].as_str().unwrap().to_string();

        let response = router
            .clone()
            .oneshot(request(Method::GET, "/api/user/one", Some(&token), Body::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let me = body_json(response).await;
        assert_eq!(me["username"], "alice");
        assert!(me.get("password_hash").is_none());

        let response = router
            .oneshot(request(Method::DELETE, "/api/file/99", Some(&token), Body::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn oversized_upload_is_payload_too_large() {
        let dir = tempfile::tempdir().unwrap();
        let (mut state, _) = AppState::for_tests(dir.path());
        state.config = Arc::new(AppConfig {
            max_upload_bytes: 1024,
            ..(*state.config).clone()
        });
        let token = state
            .token_service
            .issue(&TokenSubject::new("alice", 1))
            .unwrap();
        let router = build_router(state);
        signup(&router, "alice", "pw").await;

        let boundary = "filehub-boundary";
        let mut body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"big.bin\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            b = boundary
        )
        .into_bytes();
        body.extend(std::iter::repeat(b'x').take(4096));
        body.extend(format!("\r\n--{}--\r\n", boundary).into_bytes());

        let mut upload = request(Method::POST, "/api/file", Some(&token), Body::from(body));
        upload.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(&format!("multipart/form-data; boundary={}", boundary)).unwrap(),
        );

        let response = router.oneshot(upload).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
