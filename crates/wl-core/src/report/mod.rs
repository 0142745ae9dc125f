//! Catalog rendering for terminal and file output

pub mod json;
pub mod markdown;

use crate::usecase::UseCase;
use crate::CoreResult;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "json" => ReportFormat::Json,
            _ => ReportFormat::Markdown,
        }
    }
}

/// Render a single use case
pub fn render_usecase(usecase: &UseCase, format: ReportFormat) -> CoreResult<String> {
    match format {
        ReportFormat::Json => json::usecase(usecase),
        ReportFormat::Markdown => Ok(markdown::usecase(usecase)),
    }
}

/// Render a result list
pub fn render_list(usecases: &[&UseCase], format: ReportFormat) -> CoreResult<String> {
    match format {
        ReportFormat::Json => json::list(usecases),
        ReportFormat::Markdown => Ok(markdown::list(usecases)),
    }
}
