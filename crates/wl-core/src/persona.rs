//! Persona landing views

use crate::usecase::UseCase;
use serde::{Deserialize, Serialize};

/// Display metadata for a persona page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaProfile {
    pub slug: String,
    pub title: String,
    pub description: String,
}

impl PersonaProfile {
    /// Profile used when a slug has no entry of its own
    pub const FALLBACK_SLUG: &'static str = "enterprise";

    fn new(slug: &str, title: &str, description: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    pub fn defaults() -> Vec<PersonaProfile> {
        vec![
            Self::new(
                "police",
                "Public Safety & Law Enforcement",
                "Advanced AI solutions for crime prevention, emergency response, and community safety",
            ),
            Self::new(
                "city-planner",
                "Smart City & Urban Planning",
                "Intelligent infrastructure for comprehensive city monitoring and management",
            ),
            Self::new(
                "conservation",
                "Conservation & Environment",
                "Technology-driven solutions for wildlife protection and environmental monitoring",
            ),
            Self::new(
                "enterprise",
                "Enterprise & Business",
                "AI-powered tools for operations, security, and business intelligence",
            ),
            Self::new(
                "healthcare",
                "Healthcare & Medical",
                "Innovative solutions for patient care, monitoring, and medical operations",
            ),
        ]
    }
}

/// Search term for a persona slug: `city-planner` → `city planner`
pub fn persona_term(slug: &str) -> String {
    slug.trim().to_lowercase().replace('-', " ")
}

/// Profile plus the use cases relevant to it
#[derive(Debug, Clone, Serialize)]
pub struct PersonaView<'a> {
    pub persona: &'a PersonaProfile,
    pub usecases: Vec<&'a UseCase>,
}
