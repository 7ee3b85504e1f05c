//! Weight maps over developer combinations.
//!
//! A weight map seeds every 2-combination of today's available developers at
//! 0, then folds the filtered history: +1 per historical pair matching the
//! filter. Lower weight means the two developers have paired less and are
//! preferred by general selection; higher weight marks the stalest pair for
//! solo rotation. `BTreeMap` keeps iteration (and thus tie-breaking) in
//! canonical key order.

use std::collections::BTreeMap;

use crate::domain::{Developer, Pair, PairKey};
use crate::history::PairCombinations;

/// Weight per canonical developer combination.
pub type WeightMap = BTreeMap<PairKey, i32>;

/// Primary weights: counts of complete historical pairs.
pub fn pair_weights(history: &dyn PairCombinations, available: &[Developer]) -> WeightMap {
    weights_from_filter(history, available, Pair::is_complete)
}

/// Weights over build-tagged history.
pub fn build_pair_weights(history: &dyn PairCombinations, available: &[Developer]) -> WeightMap {
    weights_from_filter(history, available, Pair::is_build_pair)
}

/// Weights over community-tagged history.
pub fn community_pair_weights(history: &dyn PairCombinations, available: &[Developer]) -> WeightMap {
    weights_from_filter(history, available, Pair::is_community_pair)
}

fn weights_from_filter(
    history: &dyn PairCombinations,
    available: &[Developer],
    filter: impl Fn(&Pair) -> bool,
) -> WeightMap {
    let mut weights = seed_combinations(available);
    for pair in history.pairs() {
        if filter(pair)
            && let Some(key) = pair.key()
        {
            *weights.entry(key).or_insert(0) += 1;
        }
    }
    weights
}

/// All C(n,2) combinations of the available developers, seeded at 0.
fn seed_combinations(available: &[Developer]) -> WeightMap {
    let mut weights = WeightMap::new();
    for (index, first) in available.iter().enumerate() {
        for second in &available[index + 1..] {
            weights.insert(PairKey::new(&first.id, &second.id), 0);
        }
    }
    weights
}

/// Count, per developer, the historical pairs they appear in.
pub fn record_pairing_days(history: &dyn PairCombinations, devs: &mut [Developer]) {
    for dev in devs.iter_mut() {
        for pair in history.pairs() {
            if pair.has_dev(&dev.id) {
                dev.record_pairing_day();
            }
        }
    }
}

/// Count, per developer and track, the historical pairs they appear in.
pub fn record_track_weights(history: &dyn PairCombinations, devs: &mut [Developer]) {
    for dev in devs.iter_mut() {
        for pair in history.pairs() {
            if pair.has_dev(&dev.id) {
                dev.record_track_day(pair.track());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayPairs, DevId};
    use crate::history::DevPairCombinations;
    use chrono::NaiveDate;

    fn roster(ids: &[&str]) -> Vec<Developer> {
        ids.iter().map(|id| Developer::new(*id, "acme")).collect()
    }

    fn pair(ids: &[&str]) -> Pair {
        Pair::from_devs(ids.iter().map(|id| DevId::from(*id)))
    }

    fn key(a: &str, b: &str) -> PairKey {
        PairKey::new(&DevId::from(a), &DevId::from(b))
    }

    fn history(days: Vec<DayPairs>) -> DevPairCombinations {
        DevPairCombinations::new(days).unwrap()
    }

    fn day(day_of_month: u32, assignments: &[(&str, Pair)]) -> DayPairs {
        let mut record = DayPairs::new(NaiveDate::from_ymd_opt(2026, 8, day_of_month).unwrap());
        for (track, pair) in assignments {
            record.add_pair(track, pair.clone());
        }
        record
    }

    #[test]
    fn test_seeds_all_combinations_at_zero() {
        let weights = pair_weights(&history(vec![]), &roster(&["a", "b", "c", "d"]));
        assert_eq!(weights.len(), 6);
        assert!(weights.values().all(|weight| *weight == 0));
    }

    #[test]
    fn test_counts_complete_pairs_only() {
        let past = history(vec![
            day(20, &[("track1", pair(&["a", "b"])), ("track2", pair(&["c"]))]),
            day(21, &[("track1", pair(&["a", "b"]))]),
        ]);
        let weights = pair_weights(&past, &roster(&["a", "b", "c"]));
        assert_eq!(weights.len(), 3);
        assert_eq!(weights[&key("a", "b")], 2);
        assert_eq!(weights[&key("a", "c")], 0);
        assert_eq!(weights[&key("b", "c")], 0);
    }

    #[test]
    fn test_history_outside_roster_still_counted() {
        // Pairs of unavailable developers keep their fold entries; selection
        // filters them against the pool later.
        let past = history(vec![day(21, &[("track1", pair(&["x", "y"]))])]);
        let weights = pair_weights(&past, &roster(&["a", "b"]));
        assert_eq!(weights[&key("x", "y")], 1);
    }

    #[test]
    fn test_build_and_community_weights_use_tags() {
        let mut tagged = pair(&["a", "b"]);
        tagged.set_build_pair(true);
        let past = history(vec![day(21, &[("track1", tagged), ("track2", pair(&["a", "c"]))])]);
        let devs = roster(&["a", "b", "c"]);
        let build = build_pair_weights(&past, &devs);
        assert_eq!(build[&key("a", "b")], 1);
        assert_eq!(build[&key("a", "c")], 0);
        let community = community_pair_weights(&past, &devs);
        assert!(community.values().all(|weight| *weight == 0));
    }

    #[test]
    fn test_record_pairing_days() {
        let past = history(vec![
            day(20, &[("track1", pair(&["a", "b"])), ("track2", pair(&["c"]))]),
            day(21, &[("track1", pair(&["a", "c"]))]),
        ]);
        let mut devs = roster(&["a", "b", "c"]);
        record_pairing_days(&past, &mut devs);
        assert_eq!(devs[0].pairing_days, 2);
        assert_eq!(devs[1].pairing_days, 1);
        assert_eq!(devs[2].pairing_days, 2);
    }

    #[test]
    fn test_record_track_weights() {
        let past = history(vec![
            day(20, &[("track1", pair(&["a", "b"]))]),
            day(21, &[("track1", pair(&["a", "c"])), ("track2", pair(&["b"]))]),
        ]);
        let mut devs = roster(&["a", "b"]);
        record_track_weights(&past, &mut devs);
        assert_eq!(devs[0].track_weight("track1"), 2);
        assert_eq!(devs[0].track_weight("track2"), 0);
        assert_eq!(devs[1].track_weight("track1"), 1);
        assert_eq!(devs[1].track_weight("track2"), 1);
    }
}
