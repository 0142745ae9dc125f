//! Use case content store
//!
//! Records are read once, from either a directory holding one JSON file per
//! use case or a single bundle file, and kept immutable for the life of the
//! process.

use crate::usecase::UseCase;
use crate::{CoreError, CoreResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where use case records are persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// One `<id>.json` file per use case
    Directory(PathBuf),
    /// A single `{ "usecases": [...] }` file
    Bundle(PathBuf),
}

impl ContentSource {
    pub fn detect(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        let meta = std::fs::metadata(&path)
            .map_err(|e| CoreError::Config(format!("content path {}: {}", path.display(), e)))?;
        if meta.is_dir() {
            Ok(ContentSource::Directory(path))
        } else {
            Ok(ContentSource::Bundle(path))
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ContentSource::Directory(p) | ContentSource::Bundle(p) => p,
        }
    }
}

/// How malformed records are treated. Applied to every record alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Abort on the first malformed or duplicate record
    #[default]
    FailFast,
    /// Log and skip malformed or duplicate records
    SkipInvalid,
}

impl std::str::FromStr for LoadPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" | "fail-fast" | "failfast" => Ok(LoadPolicy::FailFast),
            "skip" | "skip-invalid" | "lenient" => Ok(LoadPolicy::SkipInvalid),
            other => Err(CoreError::Config(format!("unknown load policy: {}", other))),
        }
    }
}

/// Outcome of a load
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<(PathBuf, String)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[derive(Deserialize)]
struct Bundle {
    usecases: Vec<serde_json::Value>,
}

/// Immutable, id-addressable collection of use cases
#[derive(Debug, Clone, Default)]
pub struct UseCaseStore {
    records: Vec<UseCase>,
    index: HashMap<String, usize>,
}

impl UseCaseStore {
    /// Build from in-memory records. Duplicate ids are an error.
    pub fn from_records(records: Vec<UseCase>) -> CoreResult<Self> {
        let mut store = Self::default();
        for record in records {
            let source = PathBuf::from(format!("<memory>/{}", record.id));
            record.validate(&source)?;
            store.insert(record, &source)?;
        }
        Ok(store)
    }

    /// Load every record from a content source
    pub fn load(source: &ContentSource, policy: LoadPolicy) -> CoreResult<(Self, LoadReport)> {
        let candidates = match source {
            ContentSource::Directory(dir) => read_directory(dir)?,
            ContentSource::Bundle(path) => read_bundle(path)?,
        };

        let mut store = Self::default();
        let mut report = LoadReport::default();

        for (origin, raw) in candidates {
            let outcome = raw
                .and_then(|value| {
                    serde_json::from_value::<UseCase>(value)
                        .map_err(|e| CoreError::content(&origin, e.to_string()))
                })
                .and_then(|record| record.validate(&origin).map(|_| record))
                .and_then(|record| store.insert(record, &origin));

            match (outcome, policy) {
                (Ok(()), _) => report.loaded += 1,
                (Err(e), LoadPolicy::FailFast) => return Err(e),
                (Err(e), LoadPolicy::SkipInvalid) => {
                    warn!("Skipping use case from {}: {}", origin.display(), e);
                    report.skipped.push((origin, e.to_string()));
                }
            }
        }

        info!(
            "Loaded {} use cases from {} ({} skipped)",
            report.loaded,
            source.path().display(),
            report.skipped.len()
        );

        Ok((store, report))
    }

    fn insert(&mut self, record: UseCase, origin: &Path) -> CoreResult<()> {
        if self.index.contains_key(&record.id) {
            return Err(CoreError::content(origin, format!("duplicate id `{}`", record.id)));
        }
        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&UseCase> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn all(&self) -> &[UseCase] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &UseCase> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

type Candidate = (PathBuf, CoreResult<serde_json::Value>);

fn read_directory(dir: &Path) -> CoreResult<Vec<Candidate>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();

    debug!("Found {} content files in {}", files.len(), dir.display());

    let mut candidates = Vec::with_capacity(files.len());
    for file in files {
        let parsed = std::fs::read_to_string(&file)
            .map_err(|e| CoreError::content(&file, e.to_string()))
            .and_then(|text| {
                serde_json::from_str::<serde_json::Value>(&text)
                    .map_err(|e| CoreError::content(&file, e.to_string()))
            });
        candidates.push((file, parsed));
    }
    Ok(candidates)
}

fn read_bundle(path: &Path) -> CoreResult<Vec<Candidate>> {
    let text = std::fs::read_to_string(path)?;
    let bundle: Bundle =
        serde_json::from_str(&text).map_err(|e| CoreError::content(path, e.to_string()))?;

    Ok(bundle
        .usecases
        .into_iter()
        .enumerate()
        .map(|(i, value)| (path.join(format!("#{}", i)), Ok(value)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::usecase::InputModality;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_load_directory_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.json", &fixtures::json("b", "Text"));
        write(dir.path(), "a.json", &fixtures::json("a", "Visual"));
        write(dir.path(), "notes.txt", "ignored");

        let source = ContentSource::detect(dir.path()).unwrap();
        assert!(matches!(source, ContentSource::Directory(_)));

        let (store, report) = UseCaseStore::load(&source, LoadPolicy::FailFast).unwrap();
        assert_eq!(report.loaded, 2);
        assert!(report.is_clean());
        let ids: Vec<_> = store.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(store.get("b").unwrap().input, InputModality::Text);
        assert!(store.get("z").is_none());
    }

    #[test]
    fn test_fail_fast_on_malformed_record() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.json", &fixtures::json("a", "Visual"));
        write(dir.path(), "b.json", &fixtures::json("b", "Smell"));

        let source = ContentSource::Directory(dir.path().to_path_buf());
        let err = UseCaseStore::load(&source, LoadPolicy::FailFast).unwrap_err();
        match err {
            CoreError::ContentLoad { source_path, .. } => {
                assert!(source_path.ends_with("b.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_skip_invalid_applies_to_every_record() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.json", &fixtures::json("a", "Visual"));
        write(dir.path(), "b.json", "{ not json");
        write(dir.path(), "c.json", r#"{"id": "c"}"#);
        write(dir.path(), "d.json", &fixtures::json("a", "Audio"));
        write(dir.path(), "e.json", &fixtures::json("e", "Sensors"));

        let source = ContentSource::Directory(dir.path().to_path_buf());
        let (store, report) = UseCaseStore::load(&source, LoadPolicy::SkipInvalid).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(report.skipped.len(), 3);
        // first occurrence of a duplicate id wins
        assert_eq!(store.get("a").unwrap().input, InputModality::Visual);
    }

    #[test]
    fn test_path_like_id_follows_load_policy() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.json", &fixtures::json("a", "Visual"));
        write(dir.path(), "escape.json", &fixtures::json("../../escape", "Text"));

        let source = ContentSource::Directory(dir.path().to_path_buf());
        let err = UseCaseStore::load(&source, LoadPolicy::FailFast).unwrap_err();
        match err {
            CoreError::ContentLoad { source_path, .. } => {
                assert!(source_path.ends_with("escape.json"))
            }
            other => panic!("unexpected error: {other}"),
        }

        let (store, report) = UseCaseStore::load(&source, LoadPolicy::SkipInvalid).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(store.get("../../escape").is_none());
    }

    #[test]
    fn test_unreadable_directory_is_an_error_under_any_policy() {
        let dir = tempfile::tempdir().unwrap();
        let source = ContentSource::Directory(dir.path().join("missing"));
        for policy in [LoadPolicy::FailFast, LoadPolicy::SkipInvalid] {
            assert!(matches!(
                UseCaseStore::load(&source, policy),
                Err(CoreError::Io(_))
            ));
        }
    }

    #[test]
    fn test_load_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = format!(
            r#"{{"usecases": [{}, {}]}}"#,
            fixtures::json("x", "Audio"),
            fixtures::json("y", "Social Media")
        );
        let path = dir.path().join("usecases.json");
        std::fs::write(&path, bundle).unwrap();

        let source = ContentSource::detect(&path).unwrap();
        assert_eq!(source, ContentSource::Bundle(path.clone()));
        let (store, _) = UseCaseStore::load(&source, LoadPolicy::FailFast).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.all()[1].input, InputModality::SocialMedia);
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let a = fixtures::usecase("a", InputModality::Visual, "Public Safety");
        assert!(UseCaseStore::from_records(vec![a.clone(), a]).is_err());
    }

    #[test]
    fn test_load_policy_parse() {
        assert_eq!("strict".parse::<LoadPolicy>().unwrap(), LoadPolicy::FailFast);
        assert_eq!("skip".parse::<LoadPolicy>().unwrap(), LoadPolicy::SkipInvalid);
        assert!("sometimes".parse::<LoadPolicy>().is_err());
    }
}
