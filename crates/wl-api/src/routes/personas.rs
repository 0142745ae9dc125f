//! Persona landing data

use crate::routes::{Envelope, Meta};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use wl_core::{PersonaProfile, UseCase};

#[derive(Serialize)]
pub struct PersonaResponse {
    pub persona: PersonaProfile,
    pub usecases: Vec<UseCase>,
}

pub async fn get_persona(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Json<Envelope<PersonaResponse>> {
    let view = state.catalog.persona_view(&slug);
    let total = view.usecases.len();

    Json(Envelope {
        data: PersonaResponse {
            persona: view.persona.clone(),
            usecases: view.usecases.into_iter().cloned().collect(),
        },
        meta: Meta::with_total(total),
    })
}
