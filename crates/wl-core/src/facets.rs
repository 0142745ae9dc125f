//! Facet values for building filter controls

use crate::usecase::{InputModality, UseCase};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputCount {
    pub input: InputModality,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub categories: Vec<String>,
    pub personas: Vec<String>,
    pub tags: Vec<String>,
    pub inputs: Vec<InputCount>,
}

impl Facets {
    pub fn compute<'a, I>(usecases: I) -> Self
    where
        I: IntoIterator<Item = &'a UseCase>,
    {
        let mut categories = BTreeSet::new();
        let mut personas = BTreeSet::new();
        let mut tags = BTreeSet::new();
        let mut counts = [0usize; InputModality::ALL.len()];

        for uc in usecases {
            categories.insert(uc.category.clone());
            personas.extend(uc.persona_relevance.iter().cloned());
            tags.extend(uc.tags.iter().cloned());
            if let Some(i) = InputModality::ALL.iter().position(|m| *m == uc.input) {
                counts[i] += 1;
            }
        }

        Self {
            categories: categories.into_iter().collect(),
            personas: personas.into_iter().collect(),
            tags: tags.into_iter().collect(),
            inputs: InputModality::ALL
                .iter()
                .zip(counts)
                .map(|(input, count)| InputCount { input: *input, count })
                .collect(),
        }
    }
}
