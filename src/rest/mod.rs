// rest/mod.rs — Public REST API server.
//
// Axum HTTP server; the browser frontend is the only intended client.
// The /ws terminal channel rides the same router (see terminal.rs).
//
// Endpoints:
//   POST /api/ai/message
//   POST /api/ai/generate-code
//   POST /api/ai/context-aware-code
//   POST /api/ai/explain-code
//   POST /api/ai/debug
//   POST /api/ai/completion
//   POST /api/execute
//   GET  /api/azure/auth-status
//   GET  /api/azure/login
//   POST /api/azure/deploy
//   GET  /api/azure/deployment/{id}
//   GET  /api/azure/resources
//   POST /api/users/register
//   POST /api/users/login
//   GET/POST/PUT/DELETE /api/projects ...
//   GET  /api/workspace/files  + open/close/active/content
//   GET  /api/health
//   GET  /api/metrics

pub mod routes;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("listening on http://{} (terminal WebSocket at /ws)", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

/// Resolve on SIGTERM (Unix) or Ctrl-C (all platforms).
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to register SIGTERM");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.ok();
    }
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let cors = cors_layer(&ctx.config.cors_origin);

    Router::new()
        // Health + metrics (no validation, no state mutation)
        .route("/api/health", get(routes::health::health))
        .route("/api/metrics", get(routes::health::metrics))
        // AI façade
        .route("/api/ai/message", post(routes::ai::message))
        .route("/api/ai/generate-code", post(routes::ai::generate_code))
        .route(
            "/api/ai/context-aware-code",
            post(routes::ai::context_aware_code),
        )
        .route("/api/ai/explain-code", post(routes::ai::explain_code))
        .route("/api/ai/debug", post(routes::ai::debug))
        .route("/api/ai/completion", post(routes::ai::completion))
        // Execution façade
        .route("/api/execute", post(routes::execute::execute))
        // Azure façade (mocked)
        .route("/api/azure/auth-status", get(routes::azure::auth_status))
        .route("/api/azure/login", get(routes::azure::login))
        .route("/api/azure/deploy", post(routes::azure::deploy))
        .route(
            "/api/azure/deployment/{id}",
            get(routes::azure::deployment_status),
        )
        .route("/api/azure/resources", get(routes::azure::resources))
        // Demo auth
        .route("/api/users/register", post(routes::users::register))
        .route("/api/users/login", post(routes::users::login))
        // Entity CRUD
        .route(
            "/api/projects",
            get(routes::projects::list).post(routes::projects::create),
        )
        .route(
            "/api/projects/{id}",
            get(routes::projects::get_one)
                .put(routes::projects::update)
                .delete(routes::projects::delete),
        )
        .route(
            "/api/projects/{id}/files",
            get(routes::projects::list_files).post(routes::projects::create_file),
        )
        .route(
            "/api/projects/{id}/files/{file_id}",
            put(routes::projects::update_file),
        )
        // Editor workspace
        .route("/api/workspace/files", get(routes::workspace::tree))
        .route("/api/workspace/open", post(routes::workspace::open))
        .route("/api/workspace/close", post(routes::workspace::close))
        .route("/api/workspace/active", post(routes::workspace::set_active))
        .route("/api/workspace/content", put(routes::workspace::update_content))
        // Terminal WebSocket
        .route("/ws", get(crate::terminal::ws_upgrade))
        .layer(cors)
        .with_state(ctx)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    if origin == "*" {
        layer.allow_origin(Any)
    } else {
        match origin.parse::<HeaderValue>() {
            Ok(value) => layer.allow_origin(value),
            Err(_) => {
                warn!(origin, "invalid cors_origin — falling back to any origin");
                layer.allow_origin(Any)
            }
        }
    }
}
