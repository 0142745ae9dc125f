//! Catalog presentation policy
//!
//! Exclusion lists, display priorities, audience segments and persona
//! profiles are configuration handed to the filter, never literals inside it.

use crate::filter::CategoryMatch;
use crate::persona::PersonaProfile;
use crate::CoreResult;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Display rank per use case id. Lower ranks come first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityTable(HashMap<String, u32>);

impl PriorityTable {
    /// Rank of ids missing from the table
    pub const UNLISTED: u32 = 999;

    pub fn rank(&self, id: &str) -> u32 {
        self.0.get(id).copied().unwrap_or(Self::UNLISTED)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, u32)> for PriorityTable {
    fn from_iter<T: IntoIterator<Item = (String, u32)>>(iter: T) -> Self {
        PriorityTable(iter.into_iter().collect())
    }
}

/// Audience segment resolved to category substrings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    pub category_tokens: Vec<String>,
}

impl Segment {
    pub fn new(name: &str, tokens: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            category_tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogPolicy {
    /// Ids hidden from listings. Still reachable by id.
    pub excluded_ids: HashSet<String>,
    pub priority: PriorityTable,
    pub segments: Vec<Segment>,
    pub personas: Vec<PersonaProfile>,
}

impl Default for CatalogPolicy {
    fn default() -> Self {
        Self {
            excluded_ids: HashSet::new(),
            priority: PriorityTable::default(),
            segments: vec![
                Segment::new("Public Safety", &["Public Safety"]),
                Segment::new("Smart City", &["Transport", "Smart City"]),
                Segment::new("Institutions", &["Institutions", "Social Institutions"]),
                Segment::new("Enterprise", &["Industrial", "Enterprise"]),
            ],
            personas: PersonaProfile::defaults(),
        }
    }
}

impl CatalogPolicy {
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Category filter for a segment. Unknown names match as a plain substring.
    pub fn segment_filter(&self, name: &str) -> CategoryMatch {
        self.segments
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| CategoryMatch::Contains(s.category_tokens.clone()))
            .unwrap_or_else(|| CategoryMatch::Contains(vec![name.to_string()]))
    }
}
