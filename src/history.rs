//! Historical pair records, partitioned into dev and ops streams.
//!
//! A `PairCombinations` value wraps a descending-by-date sequence of
//! `DayPairs` and answers the engine's lookback queries. The dev and ops
//! variants are constructed over pre-partitioned streams; handing a stream
//! a pair of the wrong kind is a consistency violation and fails at
//! construction rather than being trusted until first access.

use chrono::NaiveDate;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::domain::{DayPairs, Pair};
use crate::error::{PairwheelError, Result};

/// Which kind of pairs a history stream carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Dev,
    Ops,
}

impl StreamKind {
    fn admits(&self, pair: &Pair) -> bool {
        match self {
            StreamKind::Dev => !pair.is_ops_pair(),
            StreamKind::Ops => pair.is_ops_pair(),
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Dev => f.write_str("dev"),
            StreamKind::Ops => f.write_str("ops"),
        }
    }
}

/// Ordered access to one stream of pairing history.
pub trait PairCombinations {
    fn kind(&self) -> StreamKind;

    /// All historical pairs, flattened, newest day first.
    fn pairs(&self) -> Vec<&Pair>;

    /// The pairs recorded `days_back` records ago; `None` past the end of
    /// history. Offset 0 is the most recent record.
    fn past_pairs(&self, days_back: usize) -> Option<Vec<&Pair>>;

    /// The pair on `track` recorded `days_back` records ago, if any.
    fn past_pair_by_track(&self, days_back: usize, track: &str) -> Option<&Pair>;

    /// Date of the most recent record.
    fn last_date(&self) -> Option<NaiveDate>;
}

/// Shared stream storage: validated, sorted newest first.
#[derive(Debug, Clone)]
struct Stream {
    days: Vec<DayPairs>,
    kind: StreamKind,
}

impl Stream {
    fn new(mut days: Vec<DayPairs>, kind: StreamKind) -> Result<Self> {
        days.sort_by(|a, b| b.date().cmp(&a.date()));
        for window in days.windows(2) {
            if window[0].date() == window[1].date() {
                return Err(PairwheelError::DuplicateDayRecord(window[0].date()));
            }
        }
        for day in &days {
            for (track, pair) in day.pairs() {
                if !kind.admits(pair) {
                    return Err(PairwheelError::StreamContamination {
                        track: track.clone(),
                        expected: kind,
                    });
                }
            }
        }
        Ok(Self { days, kind })
    }

    fn pairs(&self) -> Vec<&Pair> {
        self.days.iter().flat_map(|day| day.pairs().values()).collect()
    }

    fn past_pairs(&self, days_back: usize) -> Option<Vec<&Pair>> {
        self.days.get(days_back).map(|day| day.pairs().values().collect())
    }

    fn past_pair_by_track(&self, days_back: usize, track: &str) -> Option<&Pair> {
        self.days.get(days_back).and_then(|day| day.pair_by_track(track))
    }

    fn last_date(&self) -> Option<NaiveDate> {
        self.days.first().map(DayPairs::date)
    }
}

/// History of regular development pairs.
#[derive(Debug, Clone)]
pub struct DevPairCombinations(Stream);

impl DevPairCombinations {
    pub fn new(days: Vec<DayPairs>) -> Result<Self> {
        Ok(Self(Stream::new(days, StreamKind::Dev)?))
    }
}

impl PairCombinations for DevPairCombinations {
    fn kind(&self) -> StreamKind {
        self.0.kind
    }

    fn pairs(&self) -> Vec<&Pair> {
        self.0.pairs()
    }

    fn past_pairs(&self, days_back: usize) -> Option<Vec<&Pair>> {
        self.0.past_pairs(days_back)
    }

    fn past_pair_by_track(&self, days_back: usize, track: &str) -> Option<&Pair> {
        self.0.past_pair_by_track(days_back, track)
    }

    fn last_date(&self) -> Option<NaiveDate> {
        self.0.last_date()
    }
}

/// History of ops/interrupt pairs.
#[derive(Debug, Clone)]
pub struct OpsPairCombinations(Stream);

impl OpsPairCombinations {
    pub fn new(days: Vec<DayPairs>) -> Result<Self> {
        Ok(Self(Stream::new(days, StreamKind::Ops)?))
    }
}

impl PairCombinations for OpsPairCombinations {
    fn kind(&self) -> StreamKind {
        self.0.kind
    }

    fn pairs(&self) -> Vec<&Pair> {
        self.0.pairs()
    }

    fn past_pairs(&self, days_back: usize) -> Option<Vec<&Pair>> {
        self.0.past_pairs(days_back)
    }

    fn past_pair_by_track(&self, days_back: usize, track: &str) -> Option<&Pair> {
        self.0.past_pair_by_track(days_back, track)
    }

    fn last_date(&self) -> Option<NaiveDate> {
        self.0.last_date()
    }
}

/// Split mixed day records into (dev, ops) streams.
///
/// Every date stays present in both streams, possibly with an empty pair
/// map, so lookback offsets keep counting store days rather than days that
/// happened to contain pairs of one kind.
pub fn split_streams(days: Vec<DayPairs>) -> (Vec<DayPairs>, Vec<DayPairs>) {
    let mut dev_days = Vec::with_capacity(days.len());
    let mut ops_days = Vec::with_capacity(days.len());
    for day in days {
        let mut dev_day = DayPairs::new(day.date());
        let mut ops_day = DayPairs::new(day.date());
        for (track, pair) in day.pairs() {
            if pair.is_ops_pair() {
                ops_day.add_pair(track, pair.clone());
            } else {
                dev_day.add_pair(track, pair.clone());
            }
        }
        dev_days.push(dev_day);
        ops_days.push(ops_day);
    }
    (dev_days, ops_days)
}

/// Load day records from a JSON file. A missing file is an empty history.
pub fn load_days(path: &Path) -> Result<Vec<DayPairs>> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no history file, starting empty");
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Persist day records as JSON.
pub fn save_days(path: &Path, days: &[DayPairs]) -> Result<()> {
    let content = serde_json::to_string_pretty(days)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DevId;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
    }

    fn pair(ids: &[&str]) -> Pair {
        Pair::from_devs(ids.iter().map(|id| DevId::from(*id)))
    }

    fn ops_pair(ids: &[&str]) -> Pair {
        let mut pair = pair(ids);
        pair.set_ops_pair(true);
        pair
    }

    fn day(day_of_month: u32, track: &str, p: Pair) -> DayPairs {
        let mut record = DayPairs::new(date(day_of_month));
        record.add_pair(track, p);
        record
    }

    #[test]
    fn test_days_are_sorted_descending() {
        let history = DevPairCombinations::new(vec![
            day(19, "track1", pair(&["a", "b"])),
            day(21, "track1", pair(&["c", "d"])),
            day(20, "track1", pair(&["e", "f"])),
        ])
        .unwrap();
        assert_eq!(history.last_date(), Some(date(21)));
        assert_eq!(history.past_pair_by_track(0, "track1"), Some(&pair(&["c", "d"])));
        assert_eq!(history.past_pair_by_track(2, "track1"), Some(&pair(&["a", "b"])));
        assert_eq!(history.past_pair_by_track(3, "track1"), None);
    }

    #[test]
    fn test_duplicate_dates_are_fatal() {
        let result = DevPairCombinations::new(vec![
            day(21, "track1", pair(&["a", "b"])),
            day(21, "track2", pair(&["c", "d"])),
        ]);
        assert!(matches!(result, Err(PairwheelError::DuplicateDayRecord(d)) if d == date(21)));
    }

    #[test]
    fn test_dev_stream_rejects_ops_pairs() {
        let result = DevPairCombinations::new(vec![day(21, "ACME-ops/interrupt", ops_pair(&["a", "b"]))]);
        assert!(matches!(
            result,
            Err(PairwheelError::StreamContamination {
                expected: StreamKind::Dev,
                ..
            })
        ));
    }

    #[test]
    fn test_ops_stream_rejects_dev_pairs() {
        let result = OpsPairCombinations::new(vec![day(21, "track1", pair(&["a", "b"]))]);
        assert!(matches!(
            result,
            Err(PairwheelError::StreamContamination {
                expected: StreamKind::Ops,
                ..
            })
        ));
    }

    #[test]
    fn test_flattened_pairs_newest_first() {
        let history = DevPairCombinations::new(vec![
            day(20, "track1", pair(&["a", "b"])),
            day(21, "track1", pair(&["c", "d"])),
        ])
        .unwrap();
        let flattened = history.pairs();
        assert_eq!(flattened, vec![&pair(&["c", "d"]), &pair(&["a", "b"])]);
    }

    #[test]
    fn test_past_pairs_offsets() {
        let history = DevPairCombinations::new(vec![
            day(20, "track1", pair(&["a", "b"])),
            day(21, "track1", pair(&["c", "d"])),
        ])
        .unwrap();
        assert_eq!(history.past_pairs(0), Some(vec![&pair(&["c", "d"])]));
        assert_eq!(history.past_pairs(1), Some(vec![&pair(&["a", "b"])]));
        assert_eq!(history.past_pairs(2), None);
    }

    #[test]
    fn test_split_streams_keeps_every_date() {
        let mut mixed = DayPairs::new(date(21));
        mixed.add_pair("track1", pair(&["a", "b"]));
        mixed.add_pair("ACME-ops/interrupt", ops_pair(&["c", "d"]));
        let ops_only = day(20, "ACME-ops/interrupt", ops_pair(&["e", "f"]));

        let (dev_days, ops_days) = split_streams(vec![mixed, ops_only]);
        assert_eq!(dev_days.len(), 2);
        assert_eq!(ops_days.len(), 2);

        let dev = DevPairCombinations::new(dev_days).unwrap();
        let ops = OpsPairCombinations::new(ops_days).unwrap();
        assert_eq!(dev.pairs().len(), 1);
        assert_eq!(ops.pairs().len(), 2);
        // The dev stream still counts the ops-only date as a lookback day.
        assert_eq!(dev.past_pairs(0).map(|pairs| pairs.len()), Some(1));
        assert_eq!(dev.past_pairs(1).map(|pairs| pairs.len()), Some(0));
    }

    #[test]
    fn test_streams_report_their_kind() {
        let dev = DevPairCombinations::new(vec![day(21, "track1", pair(&["a", "b"]))]).unwrap();
        assert_eq!(dev.kind(), StreamKind::Dev);
        let ops = OpsPairCombinations::new(vec![day(21, "ACME-ops/interrupt", ops_pair(&["a", "b"]))]).unwrap();
        assert_eq!(ops.kind(), StreamKind::Ops);
    }

    #[test]
    fn test_load_and_save_days() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        assert!(load_days(&path).unwrap().is_empty());

        let days = vec![day(21, "track1", pair(&["a", "b"]))];
        save_days(&path, &days).unwrap();
        let loaded = load_days(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].date(), date(21));
        assert!(loaded[0].has_pair(&pair(&["a", "b"])));
    }
}
