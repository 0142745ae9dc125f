//! Use case records

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Signal type a use case processes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InputModality {
    Visual,
    Audio,
    #[serde(rename = "Social Media")]
    SocialMedia,
    Text,
    #[serde(rename = "Sensors (IoT, GIS)", alias = "Sensors")]
    Sensors,
}

impl InputModality {
    pub const ALL: [InputModality; 5] = [
        InputModality::Visual,
        InputModality::Audio,
        InputModality::SocialMedia,
        InputModality::Text,
        InputModality::Sensors,
    ];

    /// Wire label, as stored in content files
    pub fn label(&self) -> &'static str {
        match self {
            InputModality::Visual => "Visual",
            InputModality::Audio => "Audio",
            InputModality::SocialMedia => "Social Media",
            InputModality::Text => "Text",
            InputModality::Sensors => "Sensors (IoT, GIS)",
        }
    }

    /// Parse a filter value. `All` (or an empty value) means no constraint.
    pub fn parse_selector(value: &str) -> CoreResult<Option<InputModality>> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl fmt::Display for InputModality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InputModality {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Visual" => Ok(InputModality::Visual),
            "Audio" => Ok(InputModality::Audio),
            "Social Media" => Ok(InputModality::SocialMedia),
            "Text" => Ok(InputModality::Text),
            "Sensors (IoT, GIS)" | "Sensors" => Ok(InputModality::Sensors),
            other => Err(CoreError::Validation(format!("Unknown input modality: {}", other))),
        }
    }
}

/// Platform modules a use case is wired into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    pub edge: bool,
    pub pulse: bool,
    pub sentinel: bool,
}

impl Integration {
    pub fn enabled_modules(&self) -> Vec<&'static str> {
        let mut modules = Vec::new();
        if self.edge {
            modules.push("edge");
        }
        if self.pulse {
            modules.push("pulse");
        }
        if self.sentinel {
            modules.push("sentinel");
        }
        modules
    }
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCase {
    pub id: String,
    pub title: String,
    pub input: InputModality,
    pub category: String,
    pub description: String,
    pub beneficiaries: Vec<String>,
    #[serde(rename = "potentialCustomers")]
    pub potential_customers: Vec<String>,
    pub tags: Vec<String>,
    pub persona_relevance: Vec<String>,
    #[serde(rename = "demoAsset", default, skip_serializing_if = "Option::is_none")]
    pub demo_asset: Option<String>,
    #[serde(rename = "videoUrl", default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub outputs: Vec<String>,
    pub integration: Integration,
}

impl UseCase {
    /// Check the fields serde cannot: identifiers and titles must not be
    /// blank, and an id must be usable as a single file name
    pub fn validate(&self, source: &Path) -> CoreResult<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::content(source, "empty `id`"));
        }
        if !is_file_safe_id(&self.id) {
            return Err(CoreError::content(
                source,
                format!("id `{}` is not a valid file name", self.id.escape_debug()),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(CoreError::content(source, format!("empty `title` for `{}`", self.id)));
        }
        Ok(())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

fn is_file_safe_id(id: &str) -> bool {
    !id.contains("..") && !id.chars().any(|c| c == '/' || c == '\\' || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_parse_content_record() {
        let uc: UseCase = serde_json::from_str(&fixtures::json("visual-crowd", "Visual")).unwrap();
        assert_eq!(uc.id, "visual-crowd");
        assert_eq!(uc.input, InputModality::Visual);
        assert_eq!(uc.potential_customers, vec!["Police departments"]);
        assert_eq!(uc.demo_asset.as_deref(), Some("/demos/x.mp4"));
        assert!(uc.video_url.is_none());
        assert_eq!(uc.integration.enabled_modules(), vec!["edge", "sentinel"]);
    }

    #[test]
    fn test_sensors_label_and_alias() {
        let long: UseCase =
            serde_json::from_str(&fixtures::json("s1", "Sensors (IoT, GIS)")).unwrap();
        let short: UseCase = serde_json::from_str(&fixtures::json("s2", "Sensors")).unwrap();
        assert_eq!(long.input, InputModality::Sensors);
        assert_eq!(short.input, InputModality::Sensors);

        let out = serde_json::to_value(&short).unwrap();
        assert_eq!(out["input"], "Sensors (IoT, GIS)");
        assert!(out.get("videoUrl").is_none());
    }

    #[test]
    fn test_unknown_modality_rejected() {
        assert!(serde_json::from_str::<UseCase>(&fixtures::json("x", "Smell")).is_err());
        assert!("Smell".parse::<InputModality>().is_err());
    }

    #[test]
    fn test_selector_sentinel() {
        assert_eq!(InputModality::parse_selector("All").unwrap(), None);
        assert_eq!(InputModality::parse_selector("").unwrap(), None);
        assert_eq!(
            InputModality::parse_selector("Social Media").unwrap(),
            Some(InputModality::SocialMedia)
        );
        assert!(matches!(
            InputModality::parse_selector("visual"),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_blank_id() {
        let mut uc = fixtures::usecase("a", InputModality::Text, "Enterprise");
        assert!(uc.validate(Path::new("a.json")).is_ok());
        uc.id = "  ".into();
        assert!(matches!(
            uc.validate(Path::new("a.json")),
            Err(CoreError::ContentLoad { .. })
        ));
    }

    #[test]
    fn test_validate_path_like_id() {
        let mut uc = fixtures::usecase("a", InputModality::Text, "Enterprise");
        for id in ["../../escape", "nested/id", "win\\id", "..", "tab\tid"] {
            uc.id = id.into();
            assert!(
                matches!(uc.validate(Path::new("a.json")), Err(CoreError::ContentLoad { .. })),
                "accepted {:?}",
                id
            );
        }
        uc.id = "visual-crowd.v2".into();
        assert!(uc.validate(Path::new("a.json")).is_ok());
    }
}
