use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /analyze`. Only constructible from non-blank text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    text: String,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub label: String,
    /// Nominally 0..=100, but never range-checked.
    pub trust_score: f64,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanations: Vec<Explanation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<SourceRef>,
}

impl AnalysisResult {
    /// Summary text, if the service sent a non-blank one.
    pub fn summary(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub sentence: String,
    pub reason: String,
}

/// A recommended source: either a bare registry name or a full name + url pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceRef {
    Named(String),
    Explicit {
        name: String,
        #[serde(default, deserialize_with = "null_as_default")]
        url: String,
    },
}

impl SourceRef {
    pub fn name(&self) -> &str {
        match self {
            SourceRef::Named(name) => name,
            SourceRef::Explicit { name, .. } => name,
        }
    }
}

impl From<&str> for SourceRef {
    fn from(name: &str) -> Self {
        SourceRef::Named(name.to_string())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
