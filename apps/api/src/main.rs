use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moyeora_api::auth::password::hash_password;
use moyeora_api::config::Config;
use moyeora_api::db::memory::MemoryStore;
use moyeora_api::db::store::Store;
use moyeora_api::models::user::{Role, User};
use moyeora_api::AppState;
use moyeora_common::id::PrefixedId;

#[tokio::main]
async fn main() {
    if dotenvy::dotenv().is_err() {
        let env_path = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        let _ = dotenvy::from_path(env_path);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let port = config.port;

    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());

    bootstrap_superadmin(store.as_ref(), &config).await;

    let state = AppState {
        store,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(moyeora_api::routes::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "moyeora-api listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

/// Create (or elevate) the configured superadmin account. Roles have no
/// request-path elevation, so the moderation surface is reachable only
/// through this bootstrap.
async fn bootstrap_superadmin(store: &dyn Store, config: &Config) {
    let (Some(email), Some(password)) = (
        config.superadmin_email.as_deref(),
        config.superadmin_password.as_deref(),
    ) else {
        return;
    };
    let email = email.trim().to_lowercase();

    match store.find_user_by_email(&email).await {
        Ok(Some(user)) => {
            if !user.role.is_superadmin() {
                let _ = store.set_user_role(&user.id, Role::Superadmin).await;
                tracing::info!(user_id = %user.id, "existing account elevated to superadmin");
            }
        }
        Ok(None) => {
            let password_hash = match hash_password(password) {
                Ok(hash) => hash,
                Err(e) => {
                    tracing::error!(?e, "superadmin bootstrap failed");
                    return;
                }
            };
            let result = store
                .insert_user(User {
                    id: User::generate(),
                    email,
                    password_hash,
                    name: "Administrator".to_string(),
                    phone: String::new(),
                    birthday: String::new(),
                    school_name: String::new(),
                    school_id: String::new(),
                    role: Role::Superadmin,
                    terms_agreed: true,
                    created_at: Utc::now(),
                })
                .await;
            match result {
                Ok(user) => tracing::info!(user_id = %user.id, "superadmin account created"),
                Err(e) => tracing::error!(?e, "superadmin bootstrap failed"),
            }
        }
        Err(e) => tracing::error!(?e, "superadmin bootstrap failed"),
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    tracing::info!("shutting down");
}
