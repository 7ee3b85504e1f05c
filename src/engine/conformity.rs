//! Conformity rules and weight adaptation.
//!
//! A pair is tested against a "special" developer subset (onboarding
//! developers, on-duty developers). No member in the subset always conforms;
//! a solo member conforms only when outside the subset; a full pair touching
//! the subset must satisfy the mixing rule. Non-conforming weight-map
//! entries get a flat penalty, soft-excluding them from minimum-weight
//! selection while keeping them available as a last resort.

use std::collections::HashSet;

use crate::domain::{DevId, Developer, find_dev};
use crate::engine::weights::WeightMap;

/// Flat weight added to a non-conforming combination.
pub const CONFORMITY_PENALTY: i32 = 100;

/// Ids of today's developers matching a predicate.
pub fn special_ids<'a>(devs: &'a [Developer], predicate: impl Fn(&Developer) -> bool) -> HashSet<&'a DevId> {
    devs.iter().filter(|dev| predicate(dev)).map(|dev| &dev.id).collect()
}

/// Conformity test over the members of a pair (0..=2 of them).
pub fn is_pair_conform(
    members: &[&DevId],
    special: &HashSet<&DevId>,
    mix_rule: impl Fn(&DevId, &DevId) -> bool,
) -> bool {
    match members {
        [] => true,
        [only] => !special.contains(only),
        [first, second, ..] => {
            if special.contains(first) || special.contains(second) {
                mix_rule(first, second)
            } else {
                true
            }
        }
    }
}

/// Mixing rule: at least one member is experienced.
pub fn mixed_experience(roster: &[Developer]) -> impl Fn(&DevId, &DevId) -> bool {
    let is_new = |id: &DevId| find_dev(roster, id).is_some_and(|dev| dev.is_new);
    move |a, b| !(is_new(a) && is_new(b))
}

/// Mixing rule: both members belong to the same company.
pub fn same_company(roster: &[Developer]) -> impl Fn(&DevId, &DevId) -> bool {
    move |a, b| match (find_dev(roster, a), find_dev(roster, b)) {
        (Some(first), Some(second)) => first.company.eq_ignore_ascii_case(&second.company),
        _ => false,
    }
}

/// Penalize weight-map entries violating the onboarding and locality rules.
///
/// On-duty developers may only pair within their own company; onboarding
/// developers may not pair with each other.
pub fn adapt_weights(weights: &mut WeightMap, available: &[Developer]) {
    let on_duty = special_ids(available, |dev| dev.on_duty);
    penalize_unconform(weights, &on_duty, same_company(available));

    let new_devs = special_ids(available, |dev| dev.is_new);
    penalize_unconform(weights, &new_devs, mixed_experience(available));
}

fn penalize_unconform(
    weights: &mut WeightMap,
    special: &HashSet<&DevId>,
    mix_rule: impl Fn(&DevId, &DevId) -> bool,
) {
    for (key, weight) in weights.iter_mut() {
        let members = [key.first(), key.second()];
        if !is_pair_conform(&members, special, &mix_rule) {
            tracing::info!(pair = %key, "pair violates conformity, adding penalty");
            *weight += CONFORMITY_PENALTY;
        }
    }
}
