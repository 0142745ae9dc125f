//! Use case listing and lookup

use crate::error::ApiResult;
use crate::routes::{Envelope, Meta};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use wl_core::{CategoryMatch, FilterSpec, InputModality, SortKey, UseCase};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub persona: Option<String>,
    pub tag: Option<String>,
    pub input: Option<String>,
    pub q: Option<String>,
    pub segment: Option<String>,
    pub sort: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl ListQuery {
    /// Build the filter; empty parameters place no constraint
    pub fn into_spec(self, state: &AppState) -> ApiResult<(FilterSpec, SortKey)> {
        let sort = SortKey::from_param(self.sort.as_deref());
        let mut spec = FilterSpec::new();

        if let Some(input) = self.input.as_deref() {
            spec.input = InputModality::parse_selector(input)?;
        }

        // an explicit category wins over a segment
        spec.category = match (non_empty(self.category), non_empty(self.segment)) {
            (Some(category), _) => Some(CategoryMatch::Exact(vec![category])),
            (None, Some(segment)) => Some(state.catalog.policy().segment_filter(&segment)),
            (None, None) => None,
        };

        if let Some(persona) = non_empty(self.persona) {
            spec.personas.push(persona);
        }
        spec.tag = non_empty(self.tag);
        spec.search = non_empty(self.q);

        Ok((spec, sort))
    }
}

pub async fn list_usecases(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Envelope<Vec<UseCase>>>> {
    let (spec, sort) = query.into_spec(&state)?;

    let data: Vec<UseCase> = state
        .catalog
        .listing(spec, sort)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(Envelope {
        meta: Meta::with_total(data.len()),
        data,
    }))
}

pub async fn get_usecase(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<UseCase>>> {
    let usecase = state.catalog.get_by_id(&id)?.clone();

    Ok(Json(Envelope {
        data: usecase,
        meta: Meta::now(),
    }))
}
