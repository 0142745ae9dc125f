//! Read-only retrieval interface
//!
//! A [`Catalog`] is built once at start-up and shared by reference; nothing
//! in it changes afterwards, so any number of readers may use it at once.

use crate::facets::Facets;
use crate::filter::{sort_results, FilterSpec, SortKey};
use crate::persona::{persona_term, PersonaProfile, PersonaView};
use crate::policy::CatalogPolicy;
use crate::store::UseCaseStore;
use crate::usecase::UseCase;
use crate::{CoreError, CoreResult};

#[derive(Debug, Clone)]
pub struct Catalog {
    store: UseCaseStore,
    policy: CatalogPolicy,
    fallback_persona: PersonaProfile,
}

impl Catalog {
    pub fn new(store: UseCaseStore, policy: CatalogPolicy) -> Self {
        let fallback_persona = policy
            .personas
            .iter()
            .find(|p| p.slug == PersonaProfile::FALLBACK_SLUG)
            .cloned()
            .or_else(|| {
                PersonaProfile::defaults()
                    .into_iter()
                    .find(|p| p.slug == PersonaProfile::FALLBACK_SLUG)
            })
            .unwrap_or_else(|| PersonaProfile {
                slug: PersonaProfile::FALLBACK_SLUG.to_string(),
                title: "Enterprise".to_string(),
                description: String::new(),
            });

        Self {
            store,
            policy,
            fallback_persona,
        }
    }

    pub fn store(&self) -> &UseCaseStore {
        &self.store
    }

    pub fn policy(&self) -> &CatalogPolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Records matching `spec`, in store order
    pub fn get_all(&self, spec: &FilterSpec) -> Vec<&UseCase> {
        spec.apply(self.store.all())
    }

    pub fn get_by_id(&self, id: &str) -> CoreResult<&UseCase> {
        self.store
            .get(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    /// Filter, then order with the policy's priority table when asked to
    pub fn search(&self, spec: &FilterSpec, sort: SortKey) -> Vec<&UseCase> {
        let mut results = self.get_all(spec);
        sort_results(&mut results, sort, &self.policy.priority);
        results
    }

    /// Filter with the policy's exclusion list added to `spec`
    pub fn listing(&self, spec: FilterSpec, sort: SortKey) -> Vec<&UseCase> {
        let spec = spec.excluding(self.policy.excluded_ids.iter().cloned());
        self.search(&spec, sort)
    }

    pub fn facets(&self) -> Facets {
        Facets::compute(self.store.iter())
    }

    pub fn persona_view(&self, slug: &str) -> PersonaView<'_> {
        let persona = self
            .policy
            .personas
            .iter()
            .find(|p| p.slug.eq_ignore_ascii_case(slug.trim()))
            .unwrap_or(&self.fallback_persona);

        let spec = FilterSpec::new().with_persona(persona_term(slug));
        PersonaView {
            persona,
            usecases: self.get_all(&spec),
        }
    }
}
