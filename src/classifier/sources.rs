use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::model::SourceRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    FactCheck,
    News,
    Health,
    Science,
}

impl SourceCategory {
    /// Best guess for names the registry doesn't know.
    pub fn infer(name: &str) -> Self {
        const FACT_CHECK: &[&str] = &["FactCheck", "Snopes", "PolitiFact"];
        const HEALTH: &[&str] = &["WHO", "CDC", "NIH"];
        const SCIENCE: &[&str] = &["Nature", "Science"];

        if FACT_CHECK.iter().any(|k| name.contains(k)) {
            SourceCategory::FactCheck
        } else if HEALTH.iter().any(|k| name.contains(k)) {
            SourceCategory::Health
        } else if SCIENCE.iter().any(|k| name.contains(k)) {
            SourceCategory::Science
        } else {
            SourceCategory::News
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SourceCategory::FactCheck => "✅",
            SourceCategory::Health => "🏥",
            SourceCategory::Science => "🔬",
            SourceCategory::News => "📰",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub name: String,
    pub url: String,
    pub category: SourceCategory,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct SourceRegistryFile {
    sources: Vec<SourceEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read source registry {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid source registry: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("source registry entry #{index} has an empty name")]
    EmptyName { index: usize },
    #[error("duplicate source registry entry: {0}")]
    DuplicateName(String),
}

/// Known organisation name -> canonical URL. Read-only once built.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    entries: Vec<SourceEntry>,
    by_name: HashMap<String, usize>,
}

static BUILTIN_REGISTRY: Lazy<SourceRegistry> = Lazy::new(|| {
    SourceRegistry::from_json_str(include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/config/sources.json"
    )))
    .expect("invalid built-in source registry")
});

impl SourceRegistry {
    pub fn builtin() -> &'static SourceRegistry {
        &BUILTIN_REGISTRY
    }

    pub fn from_entries(entries: Vec<SourceEntry>) -> Result<Self, RegistryError> {
        let mut by_name = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(RegistryError::EmptyName { index });
            }
            if by_name.insert(entry.name.clone(), index).is_some() {
                return Err(RegistryError::DuplicateName(entry.name.clone()));
            }
        }
        Ok(Self { entries, by_name })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RegistryError> {
        let parsed: SourceRegistryFile = serde_json::from_str(raw)?;
        Self::from_entries(parsed.sources)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&SourceEntry> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolve(&self, source: &SourceRef) -> ResolvedSource {
        resolve(self, source)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub name: String,
    pub url: Option<String>,
    pub category: SourceCategory,
    pub description: Option<String>,
}

impl ResolvedSource {
    /// Link target; unresolved sources render as a dead `#` link.
    pub fn href(&self) -> &str {
        self.url.as_deref().unwrap_or("#")
    }

    pub fn is_linked(&self) -> bool {
        self.url.is_some()
    }
}

pub fn resolve(registry: &SourceRegistry, source: &SourceRef) -> ResolvedSource {
    match source {
        SourceRef::Named(name) => match registry.get(name) {
            Some(entry) => ResolvedSource {
                name: name.clone(),
                url: non_blank(&entry.url),
                category: entry.category,
                description: entry.description.clone(),
            },
            None => ResolvedSource {
                name: name.clone(),
                url: None,
                category: SourceCategory::infer(name),
                description: None,
            },
        },
        SourceRef::Explicit { name, url } => ResolvedSource {
            name: name.clone(),
            url: non_blank(url),
            category: registry
                .get(name)
                .map(|entry| entry.category)
                .unwrap_or_else(|| SourceCategory::infer(name)),
            description: None,
        },
    }
}

fn non_blank(url: &str) -> Option<String> {
    if url.trim().is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}
