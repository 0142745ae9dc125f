//! Use Case Catalog API Server

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use wl_core::{
    Catalog, CatalogPolicy, ContentSource, CoreResult, LoadPolicy, LogNotifier, Notifier,
    UseCaseStore, WebhookNotifier,
};

/// Application state shared across handlers
pub struct AppState {
    pub catalog: Catalog,
    pub notifier: Box<dyn Notifier>,
    pub config: AppConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub content_path: PathBuf,
    pub policy_path: Option<PathBuf>,
    pub load_policy: String,
    pub contact_recipient: String,
    pub contact_webhook_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            content_path: std::env::var("CONTENT_PATH")
                .unwrap_or_else(|_| "./content/usecases".to_string())
                .into(),
            policy_path: std::env::var("CATALOG_POLICY").ok().map(PathBuf::from),
            load_policy: std::env::var("CONTENT_LOAD_POLICY")
                .unwrap_or_else(|_| "strict".to_string()),
            contact_recipient: std::env::var("CONTACT_RECIPIENT")
                .unwrap_or_else(|_| "contact@example.com".to_string()),
            contact_webhook_url: std::env::var("CONTACT_WEBHOOK_URL")
                .ok()
                .filter(|url| !url.is_empty()),
        }
    }
}

impl AppState {
    /// Load content and policy once and pick the contact notifier
    pub fn from_config(config: AppConfig) -> CoreResult<Self> {
        let load_policy: LoadPolicy = config.load_policy.parse()?;
        let source = ContentSource::detect(&config.content_path)?;
        let (store, report) = UseCaseStore::load(&source, load_policy)?;
        if !report.is_clean() {
            info!("{} content records were skipped", report.skipped.len());
        }

        let policy = match &config.policy_path {
            Some(path) => {
                info!("Loading catalog policy from {}", path.display());
                CatalogPolicy::load(path)?
            }
            None => CatalogPolicy::default(),
        };

        let notifier: Box<dyn Notifier> = match &config.contact_webhook_url {
            Some(url) => Box::new(WebhookNotifier::new(url.clone())?),
            None => Box::new(LogNotifier),
        };
        info!("Contact submissions go to the {} notifier", notifier.name());

        Ok(Self {
            catalog: Catalog::new(store, policy),
            notifier,
            config,
        })
    }
}

/// Build the application router
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(routes::health_check))

        // Use cases
        .route("/api/usecases", get(routes::usecases::list_usecases))
        .route("/api/usecases/:id", get(routes::usecases::get_usecase))

        // Personas
        .route("/api/personas/:slug", get(routes::personas::get_persona))

        // Catalog
        .route("/api/catalog/facets", get(routes::catalog::get_facets))

        // Contact
        .route("/api/contact", post(routes::contact::submit_contact))

        // CORS
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))

        // Tracing
        .layer(TraceLayer::new_for_http())

        // State
        .with_state(state)
}
