//! Catalog facets

use crate::routes::{Envelope, Meta};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use wl_core::Facets;

pub async fn get_facets(State(state): State<Arc<AppState>>) -> Json<Envelope<Facets>> {
    Json(Envelope {
        data: state.catalog.facets(),
        meta: Meta::now(),
    })
}
