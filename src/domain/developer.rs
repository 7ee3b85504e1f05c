//! Developer identity and day-scoped counters.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stable developer identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DevId(String);

impl DevId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DevId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DevId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A developer on today's roster.
///
/// Identity (equality, ordering, hashing) depends only on `id`. The
/// counters and the `has_context` flag are scoped to one generation run and
/// are rebuilt from history each cycle; they never round-trip through serde.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Developer {
    /// Stable identity.
    pub id: DevId,

    /// Company the developer belongs to.
    pub company: String,

    /// Onboarding developer, still needs an experienced partner.
    #[serde(default)]
    pub is_new: bool,

    /// Developer-on-duty / locality flag.
    #[serde(default)]
    pub on_duty: bool,

    /// Set during a generation run when the developer carries track context.
    #[serde(skip)]
    pub has_context: bool,

    /// Number of historical pairs the developer appears in.
    #[serde(skip)]
    pub pairing_days: u32,

    /// Per-track historical co-occurrence counters.
    #[serde(skip)]
    pub track_weights: HashMap<String, u32>,
}

impl Developer {
    pub fn new(id: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id: DevId::new(id),
            company: company.into(),
            is_new: false,
            on_duty: false,
            has_context: false,
            pairing_days: 0,
            track_weights: HashMap::new(),
        }
    }

    /// Mark the developer as onboarding.
    pub fn as_new(mut self) -> Self {
        self.is_new = true;
        self
    }

    /// Mark the developer as on duty.
    pub fn as_on_duty(mut self) -> Self {
        self.on_duty = true;
        self
    }

    /// Count one more historical pair containing this developer.
    pub fn record_pairing_day(&mut self) {
        self.pairing_days += 1;
    }

    /// Count one more historical day on the given track.
    pub fn record_track_day(&mut self, track: &str) {
        *self.track_weights.entry(track.to_string()).or_insert(0) += 1;
    }

    /// Historical co-occurrence count for a track, 0 when never seen.
    pub fn track_weight(&self, track: &str) -> u32 {
        self.track_weights.get(track).copied().unwrap_or(0)
    }
}

impl PartialEq for Developer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Developer {}

impl PartialOrd for Developer {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Developer {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::hash::Hash for Developer {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Look up a developer by id in a roster slice.
pub fn find_dev<'a>(devs: &'a [Developer], id: &DevId) -> Option<&'a Developer> {
    devs.iter().find(|dev| &dev.id == id)
}

/// Mutable roster lookup by id.
pub fn find_dev_mut<'a>(devs: &'a mut [Developer], id: &DevId) -> Option<&'a mut Developer> {
    devs.iter_mut().find(|dev| &dev.id == id)
}
