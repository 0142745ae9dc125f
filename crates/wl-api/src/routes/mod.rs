//! API routes

pub mod catalog;
pub mod contact;
pub mod personas;
pub mod usecases;

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Response metadata. `total` is only set on collections.
#[derive(Serialize)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    pub timestamp: String,
}

impl Meta {
    pub fn now() -> Self {
        Self {
            total: None,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn with_total(total: usize) -> Self {
        Self {
            total: Some(total),
            ..Self::now()
        }
    }
}

/// `{ data, meta }` envelope
#[derive(Serialize)]
pub struct Envelope<T: Serialize> {
    pub data: T,
    pub meta: Meta,
}
