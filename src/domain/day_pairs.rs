//! One day's full assignment: one pair per track, dated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::Pair;

/// A dated map of track to pair. Dates are day-granular by construction
/// (`NaiveDate`); the history store holds at most one record per date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPairs {
    date: NaiveDate,
    pairs: BTreeMap<String, Pair>,
}

impl DayPairs {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            pairs: BTreeMap::new(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Insert (or replace) the pair on a track, stamping the track label.
    pub fn add_pair(&mut self, track: &str, mut pair: Pair) {
        pair.set_track(track);
        self.pairs.insert(track.to_string(), pair);
    }

    /// Merge another assignment's pairs into this one.
    pub fn add_pairs(&mut self, other: DayPairs) {
        self.pairs.extend(other.pairs);
    }

    pub fn pairs(&self) -> &BTreeMap<String, Pair> {
        &self.pairs
    }

    pub fn tracks(&self) -> impl Iterator<Item = &String> {
        self.pairs.keys()
    }

    pub fn pair_by_track(&self, track: &str) -> Option<&Pair> {
        self.pairs.get(track)
    }

    pub fn pair_by_track_mut(&mut self, track: &str) -> Option<&mut Pair> {
        self.pairs.get_mut(track)
    }

    /// Member-set equality lookup; flags and track are ignored.
    pub fn has_pair(&self, pair: &Pair) -> bool {
        self.pairs.values().any(|candidate| candidate == pair)
    }

    pub fn track_by_pair(&self, pair: &Pair) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(_, candidate)| *candidate == pair)
            .map(|(track, _)| track.as_str())
    }

    /// The first single-developer pair of the day, if any.
    pub fn solo_pair(&self) -> Option<&Pair> {
        self.pairs.values().find(|pair| pair.is_solo())
    }

    /// Swap out the pair equal to `old` for `new`, keeping the track label.
    pub fn replace_pair_with(&mut self, old: &Pair, new: Pair) {
        let track = self.track_by_pair(old).map(str::to_string);
        if let Some(track) = track {
            self.add_pair(&track, new);
        }
    }
}

impl fmt::Display for DayPairs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.date)?;
        for (track, pair) in &self.pairs {
            write!(f, " {track}={pair}")?;
        }
        Ok(())
    }
}
