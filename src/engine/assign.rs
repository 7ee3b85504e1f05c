//! The greedy two-pass track allocator.
//!
//! Pass A picks each track's first developer: continuity carries yesterday's
//! pair forward unless the cycle-wide rotation verdict says otherwise, in
//! which case a decision ladder (locked pairs, longest-tenured rotation,
//! random fallback) chooses who stays. Company-owned tracks are completed
//! immediately from the company's own pool. Pass B completes the remaining
//! tracks by minimum weight, and a last leftover developer is force-assigned
//! solo.

use chrono::NaiveDate;

use crate::domain::{Company, DayPairs, DevId, Developer, Pair, find_dev, find_dev_mut};
use crate::engine::rotation::RotationPolicy;
use crate::engine::weights::WeightMap;
use crate::error::{PairwheelError, Result};
use crate::history::PairCombinations;
use crate::rng::RandomSource;

pub struct TrackAssignmentEngine<'a> {
    history: &'a dyn PairCombinations,
    weights: &'a WeightMap,
    companies: &'a [Company],
    policy: RotationPolicy,
    /// Everyday-rotation mode shortens the longest-developer lookback
    /// window from three days to two.
    rotate_everyday: bool,
    rng: &'a mut dyn RandomSource,
}

impl<'a> TrackAssignmentEngine<'a> {
    pub fn new(
        history: &'a dyn PairCombinations,
        weights: &'a WeightMap,
        companies: &'a [Company],
        policy: RotationPolicy,
        rotate_everyday: bool,
        rng: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            history,
            weights,
            companies,
            policy,
            rotate_everyday,
            rng,
        }
    }

    /// Produce one day's assignment for the given tracks and roster.
    ///
    /// The roster is mutated: developers picked as context carriers get
    /// `has_context` set, which later selections prefer.
    pub fn generate(&mut self, date: NaiveDate, tracks: &[String], roster: &mut [Developer]) -> Result<DayPairs> {
        let possible = self.possible_tracks(tracks, roster)?;
        let mut pool: Vec<DevId> = roster.iter().map(|dev| dev.id.clone()).collect();
        let rotation_required = self.policy.is_rotation_time(self.history, &possible, roster);
        tracing::info!(rotation_required, tracks = possible.len(), devs = pool.len(), "generating day pairs");

        let mut result = DayPairs::new(date);
        for track in &possible {
            let company = self.company_for_track(track);
            let track_pool = match company {
                Some(company) => restrict_to_company(company, &pool, roster),
                None => pool.clone(),
            };
            let pair = self.first_developer(track, &track_pool, roster, rotation_required);
            remove_from_pool(&mut pool, &pair);
            result.add_pair(track, pair);

            // Company tracks are completed right away: they have priority
            // over the general pool.
            if let Some(company) = company {
                let company_pool = restrict_to_company(company, &pool, roster);
                if let Some(full) = self.second_developer(&result, &company_pool, track, roster) {
                    remove_from_pool(&mut pool, &full);
                    result.add_pair(track, full);
                }
            }
        }

        for track in &possible {
            if self.company_for_track(track).is_none() {
                let free_pool = pool.clone();
                if let Some(full) = self.second_developer(&result, &free_pool, track, roster) {
                    remove_from_pool(&mut pool, &full);
                    result.add_pair(track, full);
                }
            }
        }

        Ok(result)
    }

    /// Candidate tracks: min(given, ceil(devs/2)) in given order. A selected
    /// company track without a pair-capable company subset is a
    /// configuration error.
    fn possible_tracks(&self, tracks: &[String], roster: &[Developer]) -> Result<Vec<String>> {
        let cap = roster.len().div_ceil(2);
        let possible: Vec<String> = if tracks.len() > cap {
            tracks[..cap].to_vec()
        } else {
            tracks.to_vec()
        };
        for company in self.companies {
            if company.company_track(&possible).is_some() && company.members(roster).len() <= 1 {
                return Err(PairwheelError::CompanyWithoutDevs(company.name()));
            }
        }
        Ok(possible)
    }

    fn company_for_track(&self, track: &str) -> Option<&'a Company> {
        self.companies.iter().find(|company| company.is_company_track(track))
    }

    /// Pass A: the developer who anchors a track today.
    fn first_developer(
        &mut self,
        track: &str,
        pool: &[DevId],
        roster: &mut [Developer],
        rotation_required: bool,
    ) -> Pair {
        let mut today = Pair::new();
        let one_back = self.history.past_pair_by_track(0, track).cloned();
        tracing::debug!(
            track,
            one_back = one_back.as_ref().map(|p| p.to_string()),
            two_back = self.history.past_pair_by_track(1, track).map(|p| p.to_string()),
            three_back = self.history.past_pair_by_track(2, track).map(|p| p.to_string()),
            "first developer lookback"
        );
        if rotation_required {
            self.rotate_first_developer(track, pool, roster, &mut today, one_back);
        } else if let Some(prev) = one_back {
            tracing::info!(track, "no rotation required, carrying pair over");
            today.set_devs(prev.devs().iter().filter(|dev| pool.contains(dev)).cloned());
        }
        today
    }

    fn rotate_first_developer(
        &mut self,
        track: &str,
        pool: &[DevId],
        roster: &mut [Developer],
        today: &mut Pair,
        one_back: Option<Pair>,
    ) {
        let past_available: Vec<DevId> = one_back
            .as_ref()
            .map(|prev| prev.devs().iter().filter(|dev| pool.contains(dev)).cloned().collect())
            .unwrap_or_default();

        let Some(prev) = one_back else {
            tracing::info!(track, "no history, picking a random first developer");
            if let Some(id) = context_or_random(pool, roster, self.rng) {
                today.add_dev(id);
            }
            return;
        };

        if past_available.is_empty() {
            tracing::info!(track, "no past developer available, picking at random");
            if let Some(id) = context_or_random(pool, roster, self.rng) {
                today.add_dev(id);
            }
        } else if prev.is_solo() {
            // Solo developer stays on the track; the solo resolver may
            // still move them at the end of the cycle.
            tracing::info!(track, "previous pair was solo, leaving track open");
        } else if past_available.len() == 2 {
            if prev.is_locked_pair() {
                tracing::info!(track, pair = %prev, "pair is locked, carrying over");
                today.set_devs(past_available);
            } else if self.has_longest_dev_history(track)
                && let Some(longest) = self.longest_dev_on_track(track, roster)
                && let Some(stay) = prev.other_dev(&longest).cloned()
            {
                tracing::info!(track, longest = %longest, stay = %stay, "rotating longest developer off");
                if let Some(dev) = find_dev_mut(roster, &stay) {
                    dev.has_context = true;
                }
                today.add_dev(stay);
            } else {
                tracing::info!(track, "not enough history for longest developer, picking at random");
                if let Some(stay) = context_or_random(&past_available, roster, self.rng) {
                    if let Some(dev) = find_dev_mut(roster, &stay) {
                        dev.has_context = true;
                    }
                    today.add_dev(stay);
                }
            }
        } else {
            let stay = past_available[0].clone();
            tracing::info!(track, stay = %stay, "only one past developer available");
            if let Some(dev) = find_dev_mut(roster, &stay) {
                dev.has_context = true;
            }
            today.add_dev(stay);
        }
    }

    /// Whether the lookback window is deep enough to identify the developer
    /// who held the track longest.
    fn has_longest_dev_history(&self, track: &str) -> bool {
        let window = if self.rotate_everyday { 2 } else { 3 };
        (0..window).all(|days_back| self.history.past_pair_by_track(days_back, track).is_some())
    }

    /// The developer continuously on the track across the lookback window;
    /// falls back to a random member of yesterday's pair when the window is
    /// inconclusive.
    fn longest_dev_on_track(&mut self, track: &str, roster: &[Developer]) -> Option<DevId> {
        let last = self.history.past_pair_by_track(0, track)?;
        let last_devs: Vec<DevId> = last.devs().to_vec();
        let mut on_track = last_devs.clone();
        let window = if self.rotate_everyday { 2 } else { 3 };
        for days_back in 1..=window {
            if let Some(past) = self.history.past_pair_by_track(days_back, track) {
                on_track.retain(|dev| past.has_dev(dev));
            }
        }
        if on_track.len() == 1 {
            Some(on_track.remove(0))
        } else {
            context_or_random(&last_devs, roster, self.rng)
        }
    }

    /// Pass B: complete a track's pair by weight. Returns the full pair to
    /// install, or `None` when the track needs no completion.
    fn second_developer(
        &mut self,
        result: &DayPairs,
        pool: &[DevId],
        track: &str,
        roster: &[Developer],
    ) -> Option<Pair> {
        let pair = result.pair_by_track(track)?;
        if pair.is_complete() || pool.is_empty() {
            return None;
        }
        let completed = match pair.first_dev() {
            None => self.min_weight_pair(pool),
            Some(first) => Some(self.partner_by_weight(first.clone(), pool, track, roster)),
        };
        match completed {
            Some(full) => Some(full),
            // The leftover developer goes solo onto the track that could
            // not be completed.
            None if pool.len() == 1 => Some(Pair::from_devs([pool[0].clone()])),
            None => None,
        }
    }

    /// Minimum-weight combination fully inside the pool. Ties resolve to
    /// the first key in canonical map order.
    fn min_weight_pair(&self, pool: &[DevId]) -> Option<Pair> {
        let mut best: Option<(i32, Pair)> = None;
        for (key, &weight) in self.weights {
            if !pool.contains(key.first()) || !pool.contains(key.second()) {
                continue;
            }
            if best.as_ref().is_none_or(|(min, _)| weight < *min) {
                best = Some((weight, key.to_pair()));
            }
        }
        best.map(|(_, pair)| pair)
    }

    /// Partner for a half-filled track: the pool developer minimizing the
    /// tenure-normalized pair and track weights. Always yields a pair; it
    /// stays solo when no partner candidate exists.
    fn partner_by_weight(&self, first: DevId, pool: &[DevId], track: &str, roster: &[Developer]) -> Pair {
        let mut best: Option<(f32, DevId)> = None;
        for (key, &weight) in self.weights {
            let Some(other) = key.other_dev(&first) else {
                continue;
            };
            if !pool.contains(other) {
                continue;
            }
            let score = relative_weight(weight, other, track, roster);
            if best.as_ref().is_none_or(|(min, _)| score < *min) {
                best = Some((score, other.clone()));
            }
        }
        let mut pair = Pair::from_devs([first]);
        if let Some((_, partner)) = best {
            pair.add_dev(partner);
        }
        pair
    }
}

/// Raw co-occurrence normalized by the partner's tenure, so long-serving
/// developers are neither perpetually favored nor penalized. Both terms are
/// 0 while the partner has no recorded pairing days.
fn relative_weight(weight: i32, other: &DevId, track: &str, roster: &[Developer]) -> f32 {
    match find_dev(roster, other) {
        Some(dev) if dev.pairing_days > 0 => {
            let days = dev.pairing_days as f32;
            weight as f32 / days + dev.track_weight(track) as f32 / days
        }
        Some(_) => 0.0,
        None => weight as f32,
    }
}

fn restrict_to_company(company: &Company, pool: &[DevId], roster: &[Developer]) -> Vec<DevId> {
    pool.iter()
        .filter(|id| find_dev(roster, id).is_some_and(|dev| company.has_member(dev)))
        .cloned()
        .collect()
}

fn remove_from_pool(pool: &mut Vec<DevId>, pair: &Pair) {
    pool.retain(|id| !pair.has_dev(id));
}

/// Prefer a developer already carrying context; otherwise pick uniformly.
pub(crate) fn context_or_random(ids: &[DevId], roster: &[Developer], rng: &mut dyn RandomSource) -> Option<DevId> {
    let carries_context = |id: &DevId| find_dev(roster, id).is_some_and(|dev| dev.has_context);
    match ids {
        [] => None,
        [only] => Some(only.clone()),
        [first, ..] if carries_context(first) => Some(first.clone()),
        [_, second, ..] if carries_context(second) => Some(second.clone()),
        _ => Some(ids[rng.pick(ids.len())].clone()),
    }
}
