//! Solo repair: swap a stuck solo developer into an existing pair.
//!
//! Runs once on the finished day. A solo assignment is only touched when the
//! developer sat solo for the two preceding recorded days, or is onboarding.
//! The swap target is the maximum-weight pair of the day (the stalest one),
//! constrained to experienced members when the solo developer is new. When
//! no qualifying target exists the solo stays; that is a heuristic outcome,
//! not an error.

use crate::domain::{DayPairs, Developer, Pair, find_dev};
use crate::engine::assign::context_or_random;
use crate::engine::weights::WeightMap;
use crate::history::PairCombinations;
use crate::rng::RandomSource;

pub fn rotate_solo_pair_if_any(
    today: &mut DayPairs,
    history: &dyn PairCombinations,
    weights: &WeightMap,
    roster: &[Developer],
    rng: &mut dyn RandomSource,
) {
    let Some(solo) = today.solo_pair().cloned() else {
        return;
    };
    let Some(solo_dev) = solo.first_dev().cloned() else {
        return;
    };
    let solo_is_new = find_dev(roster, &solo_dev).is_some_and(|dev| dev.is_new);
    if !(is_solo_for_two_days(history, &solo) || solo_is_new) {
        return;
    }

    let target = if solo_is_new {
        max_weight_pair(today, weights, |pair| has_no_new_dev(pair, roster))
    } else {
        max_weight_pair(today, weights, |_| true)
    };
    let Some(target) = target else {
        tracing::info!(solo = %solo_dev, "no rotation for solo developer possible");
        return;
    };
    let Some(mover) = context_or_random(target.devs(), roster, rng) else {
        return;
    };
    let Some(displaced) = target.other_dev(&mover).cloned() else {
        return;
    };

    tracing::info!(solo = %solo_dev, mover = %mover, displaced = %displaced, "rotating solo developer");
    let new_pair = Pair::from_devs([solo_dev, mover]);
    today.replace_pair_with(&target, new_pair);
    today.replace_pair_with(&solo, Pair::from_devs([displaced]));
}

fn is_solo_for_two_days(history: &dyn PairCombinations, solo: &Pair) -> bool {
    let held = |days_back| {
        history
            .past_pairs(days_back)
            .is_some_and(|pairs| pairs.iter().any(|pair| *pair == solo))
    };
    held(0) && held(1)
}

fn has_no_new_dev(pair: &Pair, roster: &[Developer]) -> bool {
    pair.devs()
        .iter()
        .all(|id| !find_dev(roster, id).is_some_and(|dev| dev.is_new))
}

/// Maximum-weight pair of the day satisfying the predicate. Ties resolve to
/// the first track in map order.
fn max_weight_pair(today: &DayPairs, weights: &WeightMap, eligible: impl Fn(&Pair) -> bool) -> Option<Pair> {
    let mut best: Option<(i32, &Pair)> = None;
    for pair in today.pairs().values() {
        let Some(weight) = pair.key().and_then(|key| weights.get(&key).copied()) else {
            continue;
        };
        if !eligible(pair) {
            continue;
        }
        if best.as_ref().is_none_or(|(max, _)| weight > *max) {
            best = Some((weight, pair));
        }
    }
    best.map(|(_, pair)| pair.clone())
}
