//! Query filter over the use case collection
//!
//! Every supplied criterion must hold (AND). Inside a criterion that takes
//! several values, any one value is enough (OR). Results keep collection
//! order unless a [`SortKey`] is applied afterwards.

use crate::policy::PriorityTable;
use crate::usecase::{InputModality, UseCase};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How the `category` axis is matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryMatch {
    /// Category equals one of the values
    Exact(Vec<String>),
    /// Category contains one of the values as a substring
    Contains(Vec<String>),
}

impl CategoryMatch {
    fn is_empty(&self) -> bool {
        match self {
            CategoryMatch::Exact(v) | CategoryMatch::Contains(v) => v.is_empty(),
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            CategoryMatch::Exact(values) => values.iter().any(|v| v == category),
            CategoryMatch::Contains(tokens) => tokens.iter().any(|t| category.contains(t.as_str())),
        }
    }
}

/// Filter criteria. Absent fields place no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub category: Option<CategoryMatch>,
    pub personas: Vec<String>,
    pub tag: Option<String>,
    pub input: Option<InputModality>,
    pub search: Option<String>,
    pub excluded_ids: HashSet<String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(CategoryMatch::Exact(vec![category.into()]));
        self
    }

    pub fn with_category_match(mut self, category: CategoryMatch) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.personas.push(persona.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_input(mut self, input: InputModality) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn excluding<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// Number of constrained axes, as shown next to a filter panel. An axis
    /// holding several values still counts once.
    pub fn active_filter_count(&self) -> usize {
        let category = self.category.as_ref().map_or(0, |c| usize::from(!c.is_empty()));
        category
            + usize::from(!self.personas.is_empty())
            + usize::from(self.tag.is_some())
            + usize::from(self.input.is_some())
            + usize::from(self.search_term().is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.active_filter_count() == 0 && self.excluded_ids.is_empty()
    }

    pub fn matches(&self, usecase: &UseCase) -> bool {
        self.matches_with_term(usecase, self.search_term().as_deref())
    }

    fn matches_with_term(&self, usecase: &UseCase, term: Option<&str>) -> bool {
        if self.excluded_ids.contains(&usecase.id) {
            return false;
        }

        if let Some(input) = self.input {
            if usecase.input != input {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if !category.is_empty() && !category.matches(&usecase.category) {
                return false;
            }
        }

        if !self.personas.is_empty() {
            let wanted: Vec<String> = self.personas.iter().map(|p| p.to_lowercase()).collect();
            let relevant = usecase.persona_relevance.iter().any(|p| {
                let p = p.to_lowercase();
                wanted.iter().any(|w| p.contains(w.as_str()))
            });
            if !relevant {
                return false;
            }
        }

        if let Some(tag) = &self.tag {
            if !usecase.has_tag(tag) {
                return false;
            }
        }

        if let Some(term) = term {
            let hit = usecase.title.to_lowercase().contains(term)
                || usecase.description.to_lowercase().contains(term)
                || usecase.tags.iter().any(|t| t.to_lowercase().contains(term));
            if !hit {
                return false;
            }
        }

        true
    }

    /// Matching subset, in collection order
    pub fn apply<'a>(&self, usecases: &'a [UseCase]) -> Vec<&'a UseCase> {
        let term = self.search_term();
        usecases
            .iter()
            .filter(|uc| self.matches_with_term(uc, term.as_deref()))
            .collect()
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Original,
    Priority,
    Title,
}

impl SortKey {
    /// Parse a query value; unknown values keep collection order
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("priority") => SortKey::Priority,
            Some("title") => SortKey::Title,
            _ => SortKey::Original,
        }
    }
}

/// Stable sort of a result set
pub fn sort_results(results: &mut [&UseCase], key: SortKey, priority: &PriorityTable) {
    match key {
        SortKey::Original => {}
        SortKey::Priority => results.sort_by_key(|uc| priority.rank(&uc.id)),
        SortKey::Title => results.sort_by_cached_key(|uc| uc.title.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::usecase;

    fn sample() -> Vec<UseCase> {
        let mut a = usecase("a", InputModality::Visual, "Public Safety");
        a.tags = vec!["Crowd".into(), "Safety".into()];
        a.persona_relevance = vec!["Police".into(), "City Planner".into()];
        a.title = "Crowd Management".into();

        let mut b = usecase("b", InputModality::Text, "Enterprise");
        b.tags = vec!["Compliance".into()];
        b.persona_relevance = vec!["Enterprise CIO".into()];
        b.description = "Scans documents for policy breaches".into();

        let mut c = usecase("c", InputModality::Sensors, "Industrial / Enterprise");
        c.tags = vec!["Safety".into()];
        c.persona_relevance = vec!["Facility Manager".into()];

        vec![a, b, c]
    }

    fn ids(results: &[&UseCase]) -> Vec<String> {
        results.iter().map(|u| u.id.clone()).collect()
    }

    #[test]
    fn test_empty_spec_returns_everything_in_order() {
        let all = sample();
        let spec = FilterSpec::new();
        assert!(spec.is_empty());
        assert_eq!(ids(&spec.apply(&all)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_input_and_category_are_and_combined() {
        let all = sample();
        assert_eq!(ids(&FilterSpec::new().with_input(InputModality::Visual).apply(&all)), vec!["a"]);
        let both = FilterSpec::new()
            .with_category("Enterprise")
            .with_input(InputModality::Visual);
        assert!(both.apply(&all).is_empty());

        for uc in &all {
            let cat = FilterSpec::new().with_category("Enterprise").matches(uc);
            let inp = FilterSpec::new().with_input(InputModality::Visual).matches(uc);
            assert_eq!(both.matches(uc), cat && inp);
        }
    }

    #[test]
    fn test_exact_and_contains_category() {
        let all = sample();
        assert_eq!(ids(&FilterSpec::new().with_category("Enterprise").apply(&all)), vec!["b"]);

        let segment = CategoryMatch::Contains(vec!["Industrial".into(), "Enterprise".into()]);
        assert_eq!(
            ids(&FilterSpec::new().with_category_match(segment).apply(&all)),
            vec!["b", "c"]
        );

        let multi = CategoryMatch::Exact(vec!["Public Safety".into(), "Enterprise".into()]);
        assert_eq!(
            ids(&FilterSpec::new().with_category_match(multi).apply(&all)),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_persona_is_case_insensitive_substring() {
        let all = sample();
        assert_eq!(ids(&FilterSpec::new().with_persona("city planner").apply(&all)), vec!["a"]);
        assert_eq!(ids(&FilterSpec::new().with_persona("CIO").apply(&all)), vec!["b"]);
        let any = FilterSpec::new().with_persona("police").with_persona("facility");
        assert_eq!(ids(&any.apply(&all)), vec!["a", "c"]);
    }

    #[test]
    fn test_tag_is_exact_membership() {
        let all = sample();
        assert_eq!(ids(&FilterSpec::new().with_tag("Safety").apply(&all)), vec!["a", "c"]);
        assert!(FilterSpec::new().with_tag("safety").apply(&all).is_empty());
    }

    #[test]
    fn test_search_covers_title_description_tags() {
        let all = sample();
        assert_eq!(ids(&FilterSpec::new().with_search("crowd").apply(&all)), vec!["a"]);
        assert_eq!(ids(&FilterSpec::new().with_search("POLICY").apply(&all)), vec!["b"]);
        assert_eq!(ids(&FilterSpec::new().with_search("compli").apply(&all)), vec!["b"]);
        assert_eq!(FilterSpec::new().with_search("   ").apply(&all).len(), 3);
        assert!(FilterSpec::new().with_search("nothing like it").apply(&all).is_empty());
    }

    #[test]
    fn test_excluded_ids_always_removed() {
        let all = sample();
        let spec = FilterSpec::new().with_tag("Safety").excluding(["a"]);
        assert_eq!(ids(&spec.apply(&all)), vec!["c"]);
        assert_eq!(spec.active_filter_count(), 1);
        assert!(!spec.is_empty());
    }

    #[test]
    fn test_active_filter_count_is_per_axis() {
        let spec = FilterSpec::new()
            .with_category_match(CategoryMatch::Exact(vec!["Public Safety".into(), "Enterprise".into()]))
            .with_persona("police")
            .with_persona("facility");
        assert_eq!(spec.active_filter_count(), 2);

        let spec = spec.with_input(InputModality::Text).with_search("  ");
        assert_eq!(spec.active_filter_count(), 3);
    }

    #[test]
    fn test_filter_is_idempotent_subset() {
        let all = sample();
        let spec = FilterSpec::new().with_search("safety");
        let first: Vec<UseCase> = spec.apply(&all).into_iter().cloned().collect();
        let second = spec.apply(&first);
        assert_eq!(ids(&second), first.iter().map(|u| u.id.clone()).collect::<Vec<_>>());
        assert!(first.iter().all(|u| all.contains(u)));
    }

    #[test]
    fn test_sort_by_priority_and_title() {
        let all = sample();
        let mut results = FilterSpec::new().apply(&all);
        let table = PriorityTable::from_iter([("c".to_string(), 1), ("b".to_string(), 2)]);

        sort_results(&mut results, SortKey::Priority, &table);
        assert_eq!(ids(&results), vec!["c", "b", "a"]);

        sort_results(&mut results, SortKey::Title, &table);
        assert_eq!(ids(&results), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_key_param() {
        assert_eq!(SortKey::from_param(Some("Priority")), SortKey::Priority);
        assert_eq!(SortKey::from_param(Some("title")), SortKey::Title);
        assert_eq!(SortKey::from_param(Some("random")), SortKey::Original);
        assert_eq!(SortKey::from_param(None), SortKey::Original);
    }
}
