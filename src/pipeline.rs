//! Full-cycle orchestration.
//!
//! One call produces a complete day: an ops/interrupt cycle per devops
//! company over the ops history stream, then the dev cycle over what is left
//! of the roster, solo repair, role tagging, and a final merge. Ops pairs
//! already cover interrupt duty, so the build and community tags only rotate
//! on days without an ops cycle.

use chrono::NaiveDate;

use crate::config::EngineConfig;
use crate::domain::{Company, DayPairs, Developer, OpsRotation};
use crate::engine::conformity::adapt_weights;
use crate::engine::roles::{set_build_pair, set_community_pair};
use crate::engine::solo::rotate_solo_pair_if_any;
use crate::engine::weights::{
    build_pair_weights, community_pair_weights, pair_weights, record_pairing_days, record_track_weights,
};
use crate::engine::{RotationPolicy, TrackAssignmentEngine};
use crate::error::Result;
use crate::history::{DevPairCombinations, OpsPairCombinations, split_streams};
use crate::rng::RandomSource;

/// Generate the full assignment for `date` from past day records.
pub fn generate_day(
    date: NaiveDate,
    config: &EngineConfig,
    past_days: Vec<DayPairs>,
    rng: &mut dyn RandomSource,
) -> Result<DayPairs> {
    let (dev_days, ops_days) = split_streams(past_days);
    let dev_history = DevPairCombinations::new(dev_days)?;
    let ops_history = OpsPairCombinations::new(ops_days)?;

    let mut roster = config.developers.clone();
    let mut ops_pairs = DayPairs::new(date);
    for company in config.companies.iter().filter(|company| company.is_devops()) {
        let day = ops_cycle(date, config, company, &ops_history, &roster, rng)?;
        tracing::info!(company = %company.name(), %day, "ops cycle finished");
        let assigned: Vec<_> = day.pairs().values().flat_map(|pair| pair.devs()).cloned().collect();
        roster.retain(|dev| !assigned.contains(&dev.id));
        ops_pairs.add_pairs(day);
    }

    let mut weights = pair_weights(&dev_history, &roster);
    record_pairing_days(&dev_history, &mut roster);
    adapt_weights(&mut weights, &roster);
    record_track_weights(&dev_history, &mut roster);

    let policy = RotationPolicy::Daily {
        rotate_everyday: config.rotate_everyday,
    };
    let mut engine = TrackAssignmentEngine::new(
        &dev_history,
        &weights,
        &config.companies,
        policy,
        config.rotate_everyday,
        rng,
    );
    let mut today = engine.generate(date, &config.tracks, &mut roster)?;
    tracing::info!(%today, "dev cycle finished");
    rotate_solo_pair_if_any(&mut today, &dev_history, &weights, &roster, rng);

    if ops_pairs.pairs().is_empty() {
        let build = build_pair_weights(&dev_history, &roster);
        set_build_pair(&mut today, &build, rng);
        let community = community_pair_weights(&dev_history, &roster);
        set_community_pair(&mut today, &community, rng);
    }

    today.add_pairs(ops_pairs);
    Ok(today)
}

/// One company's ops/interrupt assignment over experienced members only.
/// Weights stay unadapted: the company pool is already homogeneous.
fn ops_cycle(
    date: NaiveDate,
    config: &EngineConfig,
    company: &Company,
    ops_history: &OpsPairCombinations,
    roster: &[Developer],
    rng: &mut dyn RandomSource,
) -> Result<DayPairs> {
    let mut experienced: Vec<Developer> = roster
        .iter()
        .filter(|dev| !dev.is_new && company.has_member(dev))
        .cloned()
        .collect();
    let weights = pair_weights(ops_history, &experienced);
    let policy = match company.ops_rotation() {
        OpsRotation::Weekly => RotationPolicy::Weekly { target: date },
        OpsRotation::Daily => RotationPolicy::Daily {
            rotate_everyday: config.rotate_everyday,
        },
    };
    let tracks = vec![company.ops_track()];
    let mut engine = TrackAssignmentEngine::new(
        ops_history,
        &weights,
        &config.companies,
        policy,
        config.rotate_everyday,
        rng,
    );
    let mut day = engine.generate(date, &tracks, &mut experienced)?;

    let assigned_tracks: Vec<String> = day.tracks().cloned().collect();
    for track in assigned_tracks {
        if let Some(pair) = day.pair_by_track_mut(&track) {
            pair.set_ops_pair(true);
            pair.set_build_pair(true);
            pair.set_community_pair(true);
        }
    }
    Ok(day)
}
