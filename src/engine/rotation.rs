//! Rotation policy: when continuity must break.
//!
//! The daily policy compares each track's two most recent pairs and checks
//! onboarding conformity; one global verdict per cycle governs every track.
//! The weekly policy (ops streams) rotates on ISO week boundaries instead.

use chrono::{Datelike, NaiveDate};

use crate::domain::Developer;
use crate::engine::conformity::{is_pair_conform, mixed_experience, special_ids};
use crate::history::PairCombinations;

/// Per-cycle rotation decision.
#[derive(Debug, Clone, Copy)]
pub enum RotationPolicy {
    /// Dev streams: rotate when a pair sat on a track for two days or
    /// violates onboarding conformity. `rotate_everyday` forces rotation
    /// for all tracks unconditionally.
    Daily { rotate_everyday: bool },

    /// Ops streams: rotate when the most recent record falls in a
    /// different ISO week than the target date.
    Weekly { target: NaiveDate },
}

impl RotationPolicy {
    /// Whether ANY candidate track requires rotation this cycle.
    pub fn is_rotation_time(
        &self,
        history: &dyn PairCombinations,
        tracks: &[String],
        available: &[Developer],
    ) -> bool {
        match self {
            RotationPolicy::Daily { rotate_everyday } => {
                *rotate_everyday
                    || tracks
                        .iter()
                        .any(|track| track_needs_rotation(history, track, available))
            }
            RotationPolicy::Weekly { target } => history
                .last_date()
                .is_some_and(|last| last.iso_week() != target.iso_week()),
        }
    }
}

fn track_needs_rotation(history: &dyn PairCombinations, track: &str, available: &[Developer]) -> bool {
    let Some(one_back) = history.past_pair_by_track(0, track) else {
        return false;
    };
    let two_back = history.past_pair_by_track(1, track);
    let pair_for_two_days = two_back.is_some_and(|pair| pair == one_back);

    let new_devs = special_ids(available, |dev| dev.is_new);
    let members: Vec<_> = one_back.devs().iter().collect();
    let new_dev_conform = is_pair_conform(&members, &new_devs, mixed_experience(available));

    tracing::info!(
        track,
        pair_for_two_days,
        new_dev_conform,
        "rotation check"
    );
    pair_for_two_days || !new_dev_conform
}
