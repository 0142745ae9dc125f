//! Contact form submission

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;
use wl_core::{ContactMessage, ContactRequest};

#[derive(Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub note: String,
}

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<ContactResponse>> {
    let request: ContactRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Rejected contact body: {}", e);
        ApiError::BadRequest("Invalid request body".to_string())
    })?;

    let submission = request.validate()?;
    let message = ContactMessage::compose(submission, &state.config.contact_recipient);

    let delivery = state
        .notifier
        .deliver(&message)
        .await
        .map_err(|e| ApiError::internal("Failed to process contact form", e))?;

    Ok(Json(ContactResponse {
        success: true,
        message: "Contact form submitted successfully".to_string(),
        note: delivery.note().to_string(),
    }))
}
