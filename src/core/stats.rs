//! Aggregation over a filtered trip table
//!
//! Group-by-then-count primitives and the four reporters built on them.
//! Every reporter is read-only and returns `StatsError::EmptyResult` for an
//! empty table instead of indexing into nothing.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::core::types::TripTable;
use crate::error::StatsError;

const SECS_PER_DAY: u64 = 60 * 60 * 24;
const SECS_PER_HOUR: u64 = 60 * 60;
const SECS_PER_MINUTE: u64 = 60;

/// Count occurrences, most frequent first. Equal counts are ordered by key.
pub(crate) fn value_counts<K, I>(values: I) -> Vec<(K, usize)>
where
    K: Ord + Hash,
    I: IntoIterator<Item = K>,
{
    let mut counts: HashMap<K, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    let mut sorted: Vec<(K, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

/// Most frequent value; ties go to the smallest key
pub(crate) fn mode<K, I>(values: I) -> Option<K>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    let mut best: Option<(K, usize)> = None;
    for (key, count) in counts {
        // BTreeMap iterates in key order, so strict > keeps the first tied key
        if best.as_ref().is_none_or(|(_, c)| count > *c) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key)
}

/// Whole days/hours/minutes/seconds of a span
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DurationParts {
    pub(crate) days: u64,
    pub(crate) hours: u64,
    pub(crate) minutes: u64,
    pub(crate) seconds: u64,
}

impl DurationParts {
    pub(crate) fn from_secs(total: u64) -> Self {
        let days = total / SECS_PER_DAY;
        let rem = total % SECS_PER_DAY;
        let hours = rem / SECS_PER_HOUR;
        let rem = rem % SECS_PER_HOUR;
        DurationParts {
            days,
            hours,
            minutes: rem / SECS_PER_MINUTE,
            seconds: rem % SECS_PER_MINUTE,
        }
    }

    /// Fractional seconds are truncated; negative or NaN input counts as zero
    pub(crate) fn from_secs_f64(total: f64) -> Self {
        if total.is_nan() || total <= 0.0 {
            return DurationParts::default();
        }
        Self::from_secs(total.trunc() as u64)
    }

    #[cfg(test)]
    fn total_secs(&self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }
}

impl std::fmt::Display for DurationParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} days, {} hours, {} minutes and {} seconds",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TimeStats {
    pub(crate) common_month: u32,
    pub(crate) common_day: &'static str,
    pub(crate) common_hour: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StationStats {
    pub(crate) common_start: String,
    pub(crate) common_end: String,
    /// Most frequent trip as "start and end"
    pub(crate) common_trip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DurationStats {
    pub(crate) total_secs: f64,
    pub(crate) mean_secs: f64,
    pub(crate) trips: usize,
}

impl DurationStats {
    pub(crate) fn total(&self) -> DurationParts {
        DurationParts::from_secs_f64(self.total_secs)
    }

    pub(crate) fn mean(&self) -> DurationParts {
        DurationParts::from_secs_f64(self.mean_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BirthYearStats {
    pub(crate) earliest: i32,
    pub(crate) most_recent: i32,
    pub(crate) most_common: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Demographics {
    /// The city's file has no Gender/Birth Year columns
    Unavailable,
    Available {
        genders: Vec<(String, usize)>,
        /// None when every birth year in the subset is blank
        birth_years: Option<BirthYearStats>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UserStats {
    pub(crate) user_types: Vec<(String, usize)>,
    pub(crate) demographics: Demographics,
}

fn ensure_rows(table: &TripTable) -> Result<(), StatsError> {
    if table.is_empty() {
        Err(StatsError::EmptyResult)
    } else {
        Ok(())
    }
}

/// Most frequent month, day of week and start hour
pub(crate) fn time_stats(table: &TripTable) -> Result<TimeStats, StatsError> {
    ensure_rows(table)?;
    let rows = &table.records;
    Ok(TimeStats {
        common_month: mode(rows.iter().map(|r| r.month)).ok_or(StatsError::EmptyResult)?,
        common_day: mode(rows.iter().map(|r| r.day_name())).ok_or(StatsError::EmptyResult)?,
        common_hour: mode(rows.iter().map(|r| r.hour())).ok_or(StatsError::EmptyResult)?,
    })
}

/// Most popular start station, end station and start → end trip
pub(crate) fn station_stats(table: &TripTable) -> Result<StationStats, StatsError> {
    ensure_rows(table)?;
    let rows = &table.records;
    let common_start = mode(rows.iter().map(|r| r.start_station.as_str()))
        .ok_or(StatsError::EmptyResult)?;
    let common_end =
        mode(rows.iter().map(|r| r.end_station.as_str())).ok_or(StatsError::EmptyResult)?;
    // Ties resolve on the joined label, so "A B and C" sorts before "A and Z"
    let common_trip = mode(
        rows.iter()
            .map(|r| format!("{} and {}", r.start_station, r.end_station)),
    )
    .ok_or(StatsError::EmptyResult)?;

    Ok(StationStats {
        common_start: common_start.to_string(),
        common_end: common_end.to_string(),
        common_trip,
    })
}

/// Total and mean trip duration
pub(crate) fn duration_stats(table: &TripTable) -> Result<DurationStats, StatsError> {
    ensure_rows(table)?;
    let total_secs: f64 = table.records.iter().map(|r| r.duration_secs).sum();
    let trips = table.len();
    Ok(DurationStats {
        total_secs,
        mean_secs: total_secs / trips as f64,
        trips,
    })
}

/// User type breakdown plus gender and birth year when the city records them
pub(crate) fn user_stats(table: &TripTable) -> Result<UserStats, StatsError> {
    ensure_rows(table)?;
    let rows = &table.records;
    let user_types = value_counts(rows.iter().filter_map(|r| r.user_type.as_deref()))
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

    if !table.has_demographics {
        return Ok(UserStats {
            user_types,
            demographics: Demographics::Unavailable,
        });
    }

    let genders = value_counts(rows.iter().filter_map(|r| r.gender.as_deref()))
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

    let years: Vec<i32> = rows.iter().filter_map(|r| r.birth_year).collect();
    let birth_years = match (years.iter().min(), years.iter().max(), mode(years.iter())) {
        (Some(&earliest), Some(&most_recent), Some(&most_common)) => Some(BirthYearStats {
            earliest,
            most_recent,
            most_common,
        }),
        _ => None,
    };

    Ok(UserStats {
        user_types,
        demographics: Demographics::Available {
            genders,
            birth_years,
        },
    })
}
