//! Intent classification: which assistant module should handle a request.
//!
//! [`KeywordClassifier`] counts whole-word keyword hits per intent. When the
//! keyword result is weak and a [`RemoteClassifier`] is configured,
//! [`IntentClassifier`] asks it instead, falling back to the keyword answer if
//! the remote call fails.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::cache_key;
use crate::error::Result;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Mail,
    Shopping,
    Hiring,
    Trip,
    Meeting,
    General,
}

impl Intent {
    /// Intents that map to an assistant module, in tie-break order.
    pub const ROUTABLE: [Intent; 5] = [
        Intent::Mail,
        Intent::Shopping,
        Intent::Hiring,
        Intent::Trip,
        Intent::Meeting,
    ];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Intent::Mail => &[
                "email", "e-mail", "mail", "inbox", "reply", "forward", "draft",
                "newsletter", "unsubscribe",
            ],
            Intent::Shopping => &[
                "buy", "purchase", "order", "price", "cart", "deal", "discount", "shop",
                "shopping", "product",
            ],
            Intent::Hiring => &[
                "hire", "hiring", "candidate", "resume", "cv", "interview", "recruit",
                "recruiting", "job", "applicant",
            ],
            Intent::Trip => &[
                "trip", "travel", "flight", "hotel", "itinerary", "vacation", "destination",
                "visa",
            ],
            Intent::Meeting => &[
                "meeting", "meet", "schedule", "calendar", "availability", "call",
                "appointment", "reschedule",
            ],
            Intent::General => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    Keywords,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub intent: Intent,
    /// In `[0, 1)`. Keyword confidence is `hits / (hits + 1)`.
    pub confidence: f64,
    /// Keywords (lower-cased) that matched, in text order.
    pub matched: Vec<String>,
    pub source: ClassificationSource,
}

impl Classification {
    pub fn general() -> Self {
        Self {
            intent: Intent::General,
            confidence: 0.0,
            matched: Vec::new(),
            source: ClassificationSource::Keywords,
        }
    }
}

/// Third-party classifier seam (e.g., an LLM or hosted classification API).
pub trait RemoteClassifier {
    fn classify(&self, text: &str) -> Result<Classification>;
}

/// Whole-word, case-insensitive keyword matcher. Build once and reuse.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    patterns: Vec<(Intent, Regex)>,
}

impl KeywordClassifier {
    pub fn new() -> Result<Self> {
        let patterns = Intent::ROUTABLE
            .iter()
            .map(|&intent| -> Result<(Intent, Regex)> {
                let alternation = intent
                    .keywords()
                    .iter()
                    .map(|k| regex::escape(k))
                    .collect::<Vec<_>>()
                    .join("|");
                let re = Regex::new(&format!(r"(?i)\b(?:{})s?\b", alternation))?;
                Ok((intent, re))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Pick the intent with the most keyword hits. Ties go to the intent listed
    /// first in [`Intent::ROUTABLE`]; no hits at all is [`Intent::General`].
    pub fn classify(&self, text: &str) -> Classification {
        let mut best = Classification::general();

        for (intent, re) in &self.patterns {
            let matched: Vec<String> = re
                .find_iter(text)
                .map(|m| m.as_str().to_lowercase())
                .collect();
            if matched.len() > best.matched.len() {
                let hits = matched.len() as f64;
                best = Classification {
                    intent: *intent,
                    confidence: hits / (hits + 1.0),
                    matched,
                    source: ClassificationSource::Keywords,
                };
            }
        }

        best
    }
}

/// Keyword classifier with optional remote fallback and memoization.
pub struct IntentClassifier {
    keywords: KeywordClassifier,
    remote: Option<Box<dyn RemoteClassifier + Send + Sync>>,
    cache: TtlCache<String, Classification>,
    threshold: f64,
}

impl IntentClassifier {
    pub fn new(cache: TtlCache<String, Classification>) -> Result<Self> {
        Ok(Self {
            keywords: KeywordClassifier::new()?,
            remote: None,
            cache,
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        })
    }

    pub fn with_remote(mut self, remote: Box<dyn RemoteClassifier + Send + Sync>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Keyword results below this confidence are sent to the remote classifier.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn cache(&self) -> &TtlCache<String, Classification> {
        &self.cache
    }

    pub fn classify(&self, text: &str) -> Classification {
        let key = cache_key(text);
        if let Some(hit) = self.cache.get(&key) {
            debug!(intent = ?hit.intent, "intent cache hit");
            return hit;
        }

        let local = self.keywords.classify(text);
        let result = match &self.remote {
            Some(remote) if local.confidence < self.threshold => match remote.classify(text) {
                Ok(mut remote_result) => {
                    remote_result.source = ClassificationSource::Remote;
                    remote_result
                }
                Err(e) => {
                    warn!(error = %e, "remote classifier failed, using keyword result");
                    local
                }
            },
            _ => local,
        };

        self.cache.insert(key, result.clone());
        result
    }
}
