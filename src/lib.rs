pub mod ai;
pub mod config;
pub mod deploy;
pub mod editor;
pub mod error;
pub mod execute;
pub mod metrics;
pub mod rest;
pub mod store;
pub mod terminal;

use std::sync::Arc;

use ai::AiFacade;
use config::ServerConfig;
use deploy::DeploymentManager;
use editor::EditorState;
use metrics::SharedMetrics;
use store::MemStore;
use tokio::sync::RwLock;

/// Shared application state passed to every HTTP and WebSocket handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    /// Entity CRUD tables (users, projects, files, deployments). Injected
    /// rather than global so tests can build an isolated context.
    pub store: Arc<MemStore>,
    /// Stateless AI operations (chat, codegen, explain, debug, completion).
    pub ai: Arc<AiFacade>,
    /// Simulated Azure deployment tracker (submit + poll).
    pub deployments: Arc<DeploymentManager>,
    /// Server-side editor workspace: file tree + open tabs.
    pub workspace: Arc<RwLock<EditorState>>,
    /// In-process Prometheus-style counters.
    pub metrics: SharedMetrics,
    pub started_at: std::time::Instant,
}

impl AppContext {
    /// Build a context from a config. The workspace is seeded with the demo
    /// project tree the frontend expects on first load.
    pub fn new(config: ServerConfig) -> Self {
        let ai = Arc::new(AiFacade::from_config(&config.ai));
        Self {
            config: Arc::new(config),
            store: Arc::new(MemStore::new()),
            ai,
            deployments: Arc::new(DeploymentManager::new()),
            workspace: Arc::new(RwLock::new(EditorState::sample_workspace())),
            metrics: Arc::new(metrics::ServerMetrics::new()),
            started_at: std::time::Instant::now(),
        }
    }
}
