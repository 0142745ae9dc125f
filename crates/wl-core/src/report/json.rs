//! JSON rendering

use crate::usecase::UseCase;
use crate::CoreResult;

pub fn usecase(usecase: &UseCase) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(usecase)?)
}

pub fn list(usecases: &[&UseCase]) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(usecases)?)
}
