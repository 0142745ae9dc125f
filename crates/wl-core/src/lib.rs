//! Use Case Catalog Core
//!
//! This crate provides the content store, query filter and retrieval
//! interface behind the use case catalog, plus validation and delivery of
//! contact form submissions.

pub mod catalog;
pub mod contact;
pub mod facets;
pub mod filter;
pub mod persona;
pub mod policy;
pub mod report;
pub mod store;
pub mod usecase;

use std::path::PathBuf;
use thiserror::Error;

pub use catalog::Catalog;
pub use contact::{ContactMessage, ContactRequest, ContactSubmission, Delivery, LogNotifier, Notifier, WebhookNotifier};
pub use facets::Facets;
pub use filter::{CategoryMatch, FilterSpec, SortKey};
pub use persona::{PersonaProfile, PersonaView};
pub use policy::{CatalogPolicy, PriorityTable, Segment};
pub use store::{ContentSource, LoadPolicy, LoadReport, UseCaseStore};
pub use usecase::{InputModality, Integration, UseCase};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Malformed content in {source_path}: {reason}")]
    ContentLoad { source_path: PathBuf, reason: String },

    #[error("Use case not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    pub(crate) fn content(source_path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        CoreError::ContentLoad {
            source_path: source_path.into(),
            reason: reason.into(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
