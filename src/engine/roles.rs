//! Role tagging: one "build" and one "community" pair per cycle.
//!
//! Each role gets its own weight map built from role-tagged history; the
//! minimum-weight eligible pair of the day takes the tag, so the duty
//! rotates fairly. With no weighted candidate a uniformly random eligible
//! pair is tagged instead. Community selection excludes the pair already
//! tagged build, so no pair ever carries both tags in one cycle.

use crate::domain::{DayPairs, Pair};
use crate::engine::weights::WeightMap;
use crate::rng::RandomSource;

pub fn set_build_pair(today: &mut DayPairs, build_weights: &WeightMap, rng: &mut dyn RandomSource) {
    if let Some(track) = tag_candidate(today, build_weights, |_| true, rng)
        && let Some(pair) = today.pair_by_track_mut(&track)
    {
        tracing::info!(track, "tagging build pair");
        pair.set_build_pair(true);
    }
}

pub fn set_community_pair(today: &mut DayPairs, community_weights: &WeightMap, rng: &mut dyn RandomSource) {
    if let Some(track) = tag_candidate(today, community_weights, |pair| !pair.is_build_pair(), rng)
        && let Some(pair) = today.pair_by_track_mut(&track)
    {
        tracing::info!(track, "tagging community pair");
        pair.set_community_pair(true);
    }
}

/// Track of the minimum-weight eligible pair; falls back to a random
/// eligible pair when none carries a weight entry. Ties resolve to the
/// first track in map order.
fn tag_candidate(
    today: &DayPairs,
    weights: &WeightMap,
    eligible: impl Fn(&Pair) -> bool,
    rng: &mut dyn RandomSource,
) -> Option<String> {
    let mut best: Option<(i32, &String)> = None;
    for (track, pair) in today.pairs() {
        if !eligible(pair) {
            continue;
        }
        let Some(weight) = pair.key().and_then(|key| weights.get(&key).copied()) else {
            continue;
        };
        if best.as_ref().is_none_or(|(min, _)| weight < *min) {
            best = Some((weight, track));
        }
    }
    if let Some((_, track)) = best {
        return Some(track.clone());
    }

    let fallback: Vec<&String> = today
        .pairs()
        .iter()
        .filter(|(_, pair)| eligible(pair))
        .map(|(track, _)| track)
        .collect();
    if fallback.is_empty() {
        None
    } else {
        Some(fallback[rng.pick(fallback.len())].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DevId, PairKey};
    use crate::rng::SeededRandom;
    use chrono::NaiveDate;

    fn pair(ids: &[&str]) -> Pair {
        Pair::from_devs(ids.iter().map(|id| DevId::from(*id)))
    }

    fn key(a: &str, b: &str) -> PairKey {
        PairKey::new(&DevId::from(a), &DevId::from(b))
    }

    fn today() -> DayPairs {
        let mut day = DayPairs::new(NaiveDate::from_ymd_opt(2026, 8, 22).unwrap());
        day.add_pair("track1", pair(&["a", "b"]));
        day.add_pair("track2", pair(&["c", "d"]));
        day
    }

    fn weights(entries: &[(&str, &str, i32)]) -> WeightMap {
        entries.iter().map(|(a, b, w)| (key(a, b), *w)).collect()
    }

    #[test]
    fn test_minimum_weight_pair_gets_build_tag() {
        let mut day = today();
        let build = weights(&[("a", "b", 3), ("c", "d", 1)]);
        let mut rng = SeededRandom::new(1);
        set_build_pair(&mut day, &build, &mut rng);
        assert!(!day.pair_by_track("track1").unwrap().is_build_pair());
        assert!(day.pair_by_track("track2").unwrap().is_build_pair());
    }

    #[test]
    fn test_community_excludes_build_pair() {
        let mut day = today();
        // track2 wins both minimums; community must go elsewhere.
        let role_weights = weights(&[("a", "b", 3), ("c", "d", 1)]);
        let mut rng = SeededRandom::new(1);
        set_build_pair(&mut day, &role_weights, &mut rng);
        set_community_pair(&mut day, &role_weights, &mut rng);
        let track1 = day.pair_by_track("track1").unwrap();
        let track2 = day.pair_by_track("track2").unwrap();
        assert!(track2.is_build_pair() && !track2.is_community_pair());
        assert!(track1.is_community_pair() && !track1.is_build_pair());
    }

    #[test]
    fn test_random_fallback_without_weight_entries() {
        let mut day = today();
        let empty = WeightMap::new();
        let mut rng = SeededRandom::new(1);
        set_build_pair(&mut day, &empty, &mut rng);
        let tagged = day.pairs().values().filter(|pair| pair.is_build_pair()).count();
        assert_eq!(tagged, 1);
    }

    #[test]
    fn test_fallback_never_double_tags() {
        let day = today();
        let empty = WeightMap::new();
        for seed in 0..32 {
            let mut fresh = day.clone();
            let mut rng = SeededRandom::new(seed);
            set_build_pair(&mut fresh, &empty, &mut rng);
            set_community_pair(&mut fresh, &empty, &mut rng);
            let both = fresh
                .pairs()
                .values()
                .filter(|pair| pair.is_build_pair() && pair.is_community_pair())
                .count();
            assert_eq!(both, 0, "seed {seed} double-tagged a pair");
        }
    }

    #[test]
    fn test_single_pair_day_gets_build_but_not_community() {
        let mut day = DayPairs::new(NaiveDate::from_ymd_opt(2026, 8, 22).unwrap());
        day.add_pair("track1", pair(&["a", "b"]));
        let empty = WeightMap::new();
        let mut rng = SeededRandom::new(1);
        set_build_pair(&mut day, &empty, &mut rng);
        set_community_pair(&mut day, &empty, &mut rng);
        let only = day.pair_by_track("track1").unwrap();
        assert!(only.is_build_pair());
        assert!(!only.is_community_pair());
    }

    #[test]
    fn test_solo_pairs_fall_back_to_random() {
        // Solo pairs have no weight-map key, so tagging among them always
        // goes through the random fallback.
        let mut day = DayPairs::new(NaiveDate::from_ymd_opt(2026, 8, 22).unwrap());
        day.add_pair("track1", pair(&["a"]));
        let role_weights = weights(&[("a", "b", 0)]);
        let mut rng = SeededRandom::new(1);
        set_build_pair(&mut day, &role_weights, &mut rng);
        assert!(day.pair_by_track("track1").unwrap().is_build_pair());
    }

    #[test]
    fn test_empty_day_is_a_no_op() {
        let mut day = DayPairs::new(NaiveDate::from_ymd_opt(2026, 8, 22).unwrap());
        let mut rng = SeededRandom::new(1);
        set_build_pair(&mut day, &WeightMap::new(), &mut rng);
        set_community_pair(&mut day, &WeightMap::new(), &mut rng);
        assert!(day.pairs().is_empty());
    }
}
