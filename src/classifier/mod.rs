pub mod label;
pub mod score;
pub mod sources;

pub use label::{classify, Verdict};
pub use score::{band, fill_percent, ScoreBand};
pub use sources::{
    resolve, RegistryError, ResolvedSource, SourceCategory, SourceEntry, SourceRegistry,
};
