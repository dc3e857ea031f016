//! Entity extraction from free text.
//!
//! Heuristics cover email addresses, dates (ISO dates and day words), clock
//! times, durations and currency amounts. A [`RemoteExtractor`] can contribute
//! additional entities; its results are merged after the local ones.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::cache_key;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    pub value: f64,
    /// ISO 4217 code.
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    pub emails: Vec<String>,
    /// ISO dates (`2026-03-16`) and lower-cased day words (`tomorrow`, `friday`).
    pub dates: Vec<String>,
    /// 24-hour `HH:MM`.
    pub times: Vec<String>,
    pub durations_minutes: Vec<u32>,
    pub amounts: Vec<Amount>,
}

impl Entities {
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
            && self.dates.is_empty()
            && self.times.is_empty()
            && self.durations_minutes.is_empty()
            && self.amounts.is_empty()
    }

    /// Append entities from `other` that are not already present.
    pub fn merge(&mut self, other: Entities) {
        push_unique(&mut self.emails, other.emails);
        push_unique(&mut self.dates, other.dates);
        push_unique(&mut self.times, other.times);
        push_unique(&mut self.durations_minutes, other.durations_minutes);
        push_unique(&mut self.amounts, other.amounts);
    }
}

fn push_unique<T: PartialEq>(into: &mut Vec<T>, items: impl IntoIterator<Item = T>) {
    for item in items {
        if !into.contains(&item) {
            into.push(item);
        }
    }
}

/// Third-party extraction seam.
pub trait RemoteExtractor {
    fn extract(&self, text: &str) -> Result<Entities>;
}

struct Patterns {
    email: Regex,
    iso_date: Regex,
    day_word: Regex,
    clock: Regex,
    duration: Regex,
    symbol_amount: Regex,
    code_amount: Regex,
}

impl Patterns {
    fn compile() -> Result<Self> {
        Ok(Self {
            email: Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b")?,
            iso_date: Regex::new(r"\b\d{4}-\d{2}-\d{2}\b")?,
            day_word: Regex::new(
                r"(?i)\b(today|tomorrow|monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
            )?,
            clock: Regex::new(r"(?i)\b([01]?\d|2[0-3])(?::([0-5]\d))?\s*(am|pm)?\b")?,
            duration: Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(minutes?|mins?|hours?|hrs?|m|h)\b")?,
            symbol_amount: Regex::new(r"([$€£])\s?((?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{1,2})?)")?,
            code_amount: Regex::new(r"(?i)\b(\d+(?:\.\d{1,2})?)\s?(usd|eur|gbp)\b")?,
        })
    }

    fn extract(&self, text: &str) -> Entities {
        let mut entities = Entities::default();

        push_unique(
            &mut entities.emails,
            self.email.find_iter(text).map(|m| m.as_str().to_lowercase()),
        );

        push_unique(
            &mut entities.dates,
            self.iso_date.find_iter(text).map(|m| m.as_str().to_string()),
        );
        push_unique(
            &mut entities.dates,
            self.day_word.find_iter(text).map(|m| m.as_str().to_lowercase()),
        );

        push_unique(
            &mut entities.times,
            self.clock.captures_iter(text).filter_map(|c| {
                let hour: u32 = c.get(1)?.as_str().parse().ok()?;
                let minute: u32 = c.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
                let meridiem = c.get(3).map(|m| m.as_str().to_lowercase());
                // A bare number is not a time.
                if c.get(2).is_none() && meridiem.is_none() {
                    return None;
                }
                let hour = match meridiem.as_deref() {
                    Some(_) if hour == 0 || hour > 12 => return None,
                    Some("pm") if hour < 12 => hour + 12,
                    Some("am") if hour == 12 => 0,
                    _ => hour,
                };
                Some(format!("{:02}:{:02}", hour, minute))
            }),
        );

        push_unique(
            &mut entities.durations_minutes,
            self.duration.captures_iter(text).filter_map(|c| {
                let amount: f64 = c.get(1)?.as_str().parse().ok()?;
                let unit = c.get(2)?.as_str().to_lowercase();
                let minutes = if unit.starts_with('h') {
                    amount * 60.0
                } else {
                    amount
                };
                (minutes >= 1.0 && minutes <= f64::from(u32::MAX)).then(|| minutes.round() as u32)
            }),
        );

        push_unique(
            &mut entities.amounts,
            self.symbol_amount.captures_iter(text).filter_map(|c| {
                let currency = match c.get(1)?.as_str() {
                    "$" => "USD",
                    "€" => "EUR",
                    "£" => "GBP",
                    _ => return None,
                };
                let value: f64 = c.get(2)?.as_str().replace(',', "").parse().ok()?;
                Some(Amount {
                    value,
                    currency: currency.to_string(),
                })
            }),
        );
        push_unique(
            &mut entities.amounts,
            self.code_amount.captures_iter(text).filter_map(|c| {
                let value: f64 = c.get(1)?.as_str().parse().ok()?;
                Some(Amount {
                    value,
                    currency: c.get(2)?.as_str().to_uppercase(),
                })
            }),
        );

        entities
    }
}

/// Extract entities with the built-in heuristics only.
///
/// Compiles the patterns on every call; hold an [`EntityExtractor`] to reuse them.
pub fn extract_entities(text: &str) -> Result<Entities> {
    Ok(Patterns::compile()?.extract(text))
}

/// Heuristic extractor with optional remote enrichment and memoization.
pub struct EntityExtractor {
    patterns: Patterns,
    remote: Option<Box<dyn RemoteExtractor + Send + Sync>>,
    cache: TtlCache<String, Entities>,
}

impl EntityExtractor {
    pub fn new(cache: TtlCache<String, Entities>) -> Result<Self> {
        Ok(Self {
            patterns: Patterns::compile()?,
            remote: None,
            cache,
        })
    }

    pub fn with_remote(mut self, remote: Box<dyn RemoteExtractor + Send + Sync>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn cache(&self) -> &TtlCache<String, Entities> {
        &self.cache
    }

    pub fn extract(&self, text: &str) -> Entities {
        let key = cache_key(text);
        if let Some(hit) = self.cache.get(&key) {
            debug!("entity cache hit");
            return hit;
        }

        let mut entities = self.patterns.extract(text);
        if let Some(remote) = &self.remote {
            match remote.extract(text) {
                Ok(extra) => entities.merge(extra),
                Err(e) => warn!(error = %e, "remote extractor failed, using heuristic entities"),
            }
        }

        self.cache.insert(key, entities.clone());
        entities
    }
}
