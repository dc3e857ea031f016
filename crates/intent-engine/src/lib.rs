//! # intent-engine
//!
//! Routes free-text requests to the right Optigence assistant module and pulls
//! structured entities (emails, dates, times, durations, amounts) out of them.
//!
//! Both the classifier and the extractor run cheap regex heuristics first and
//! can defer to a third-party service behind a trait. Results are memoized in a
//! capacity-bounded, TTL-aware [`TtlCache`] injected by the caller.
//!
//! ## Modules
//!
//! - [`intent`] — Keyword classification and the remote-classifier seam
//! - [`entities`] — Regex entity extraction and the remote-extractor seam
//! - [`cache`] — Bounded LRU cache with per-entry expiry
//! - [`error`] — Error types

pub mod cache;
pub mod entities;
pub mod error;
pub mod intent;

pub use cache::TtlCache;
pub use entities::{extract_entities, Amount, Entities, EntityExtractor, RemoteExtractor};
pub use error::IntentError;
pub use intent::{
    Classification, ClassificationSource, Intent, IntentClassifier, KeywordClassifier,
    RemoteClassifier,
};

/// Normalize text into a cache key: trimmed and lower-cased.
///
/// Inner whitespace is kept as-is because several patterns are sensitive to it.
pub fn cache_key(text: &str) -> String {
    text.trim().to_lowercase()
}
