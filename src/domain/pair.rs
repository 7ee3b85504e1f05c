//! Pairs: unordered sets of at most two developers on a track.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::DevId;

/// One track's assignment for one day.
///
/// Equality and hashing depend ONLY on the canonically sorted developer set.
/// Two pairs with the same members but different flags or tracks are equal;
/// this is what lets today's pairs be matched against historical weight-map
/// entries regardless of how they were tagged back then.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pair {
    devs: Vec<DevId>,

    #[serde(default)]
    track: String,

    #[serde(default)]
    build_pair: bool,

    #[serde(default)]
    community_pair: bool,

    #[serde(default)]
    ops_pair: bool,

    #[serde(default)]
    locked_pair: bool,
}

impl Pair {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_devs(devs: impl IntoIterator<Item = DevId>) -> Self {
        let mut pair = Self::new();
        pair.set_devs(devs);
        pair
    }

    /// Members in canonical (sorted) order.
    pub fn devs(&self) -> &[DevId] {
        &self.devs
    }

    pub fn first_dev(&self) -> Option<&DevId> {
        self.devs.first()
    }

    pub fn second_dev(&self) -> Option<&DevId> {
        self.devs.get(1)
    }

    /// The member that is not `dev`, when `dev` is a member.
    pub fn other_dev(&self, dev: &DevId) -> Option<&DevId> {
        if !self.has_dev(dev) {
            return None;
        }
        self.devs.iter().find(|member| *member != dev)
    }

    pub fn add_dev(&mut self, dev: DevId) {
        self.devs.push(dev);
        self.devs.sort();
    }

    /// Replace the member set, re-establishing canonical order.
    pub fn set_devs(&mut self, devs: impl IntoIterator<Item = DevId>) {
        self.devs.clear();
        self.devs.extend(devs);
        self.devs.sort();
    }

    pub fn has_dev(&self, dev: &DevId) -> bool {
        self.devs.iter().any(|member| member == dev)
    }

    pub fn is_complete(&self) -> bool {
        self.devs.len() == 2
    }

    pub fn is_solo(&self) -> bool {
        self.devs.len() == 1
    }

    /// Canonical weight-map key; `None` unless the pair is complete.
    pub fn key(&self) -> Option<PairKey> {
        match self.devs.as_slice() {
            [a, b] => Some(PairKey::new(a, b)),
            _ => None,
        }
    }

    pub fn track(&self) -> &str {
        &self.track
    }

    pub fn set_track(&mut self, track: &str) {
        self.track = track.to_string();
    }

    pub fn is_build_pair(&self) -> bool {
        self.build_pair
    }

    pub fn set_build_pair(&mut self, build_pair: bool) {
        self.build_pair = build_pair;
    }

    pub fn is_community_pair(&self) -> bool {
        self.community_pair
    }

    pub fn set_community_pair(&mut self, community_pair: bool) {
        self.community_pair = community_pair;
    }

    pub fn is_ops_pair(&self) -> bool {
        self.ops_pair
    }

    pub fn set_ops_pair(&mut self, ops_pair: bool) {
        self.ops_pair = ops_pair;
    }

    pub fn is_locked_pair(&self) -> bool {
        self.locked_pair
    }

    pub fn set_locked_pair(&mut self, locked_pair: bool) {
        self.locked_pair = locked_pair;
    }
}

impl PartialEq for Pair {
    fn eq(&self, other: &Self) -> bool {
        self.devs == other.devs
    }
}

impl Eq for Pair {}

impl std::hash::Hash for Pair {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.devs.hash(state);
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members = self.devs.iter().map(DevId::as_str).collect::<Vec<_>>().join(", ");
        write!(f, "[{members}]")
    }
}

/// Canonical composite key for weight maps: a sorted developer-id pair.
///
/// Weight maps are `BTreeMap<PairKey, i32>`, so iteration (and therefore
/// tie-breaking in minimum/maximum selection) is deterministic within a run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey(DevId, DevId);

impl PairKey {
    pub fn new(a: &DevId, b: &DevId) -> Self {
        if a <= b {
            Self(a.clone(), b.clone())
        } else {
            Self(b.clone(), a.clone())
        }
    }

    pub fn first(&self) -> &DevId {
        &self.0
    }

    pub fn second(&self) -> &DevId {
        &self.1
    }

    pub fn has_dev(&self, dev: &DevId) -> bool {
        &self.0 == dev || &self.1 == dev
    }

    pub fn other_dev(&self, dev: &DevId) -> Option<&DevId> {
        if &self.0 == dev {
            Some(&self.1)
        } else if &self.1 == dev {
            Some(&self.0)
        } else {
            None
        }
    }

    /// Expand the key back into an (untracked, unflagged) pair.
    pub fn to_pair(&self) -> Pair {
        Pair::from_devs([self.0.clone(), self.1.clone()])
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.0, self.1)
    }
}
