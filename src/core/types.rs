//! Core data types for the trip explorer
//!
//! Cities, filters, trip records and the filtered trip table.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::consts::MONTHS;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub(crate) const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    pub(crate) fn parse(input: &str) -> Result<Self, AppError> {
        let normalized = input.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "chicago" => Ok(City::Chicago),
            "new york city" | "new york" | "nyc" => Ok(City::NewYorkCity),
            "washington" => Ok(City::Washington),
            _ => Err(AppError::InvalidCity {
                input: input.trim().to_string(),
            }),
        }
    }

    /// Canonical lowercase name, also the config key
    pub(crate) fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    pub(crate) fn display_name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    pub(crate) fn default_file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum MonthFilter {
    #[default]
    All,
    /// 1-based calendar month, January through June
    Month(u32),
}

impl MonthFilter {
    pub(crate) fn parse(input: &str) -> Result<Self, AppError> {
        let lower = input.trim().to_lowercase();
        if lower == "all" {
            return Ok(MonthFilter::All);
        }
        MONTHS
            .iter()
            .position(|m| *m == lower)
            .map(|idx| MonthFilter::Month(idx as u32 + 1))
            .ok_or_else(|| AppError::InvalidMonth {
                input: input.trim().to_string(),
            })
    }

    pub(crate) fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => m == month,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum DayFilter {
    #[default]
    All,
    Day(Weekday),
}

impl DayFilter {
    pub(crate) fn parse(input: &str) -> Result<Self, AppError> {
        let lower = input.trim().to_lowercase();
        let day = match lower.as_str() {
            "all" => return Ok(DayFilter::All),
            "monday" => Weekday::Mon,
            "tuesday" => Weekday::Tue,
            "wednesday" => Weekday::Wed,
            "thursday" => Weekday::Thu,
            "friday" => Weekday::Fri,
            "saturday" => Weekday::Sat,
            "sunday" => Weekday::Sun,
            _ => {
                return Err(AppError::InvalidDay {
                    input: input.trim().to_string(),
                });
            }
        };
        Ok(DayFilter::Day(day))
    }

    pub(crate) fn matches(self, day: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => d == day,
        }
    }
}

/// Month/day selection. Both parts may be set at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Filter {
    pub(crate) month: MonthFilter,
    pub(crate) day: DayFilter,
}

impl Filter {
    pub(crate) fn new(month: MonthFilter, day: DayFilter) -> Self {
        Filter { month, day }
    }

    pub(crate) fn matches(&self, record: &TripRecord) -> bool {
        self.month.matches(record.month) && self.day.matches(record.day_of_week)
    }

    /// Human-readable description, e.g. "month: March, day: all"
    pub(crate) fn describe(&self) -> String {
        let month = match self.month {
            MonthFilter::All => "all".to_string(),
            MonthFilter::Month(m) => month_name(m).to_string(),
        };
        let day = match self.day {
            DayFilter::All => "all",
            DayFilter::Day(d) => weekday_name(d),
        };
        format!("month: {month}, day: {day}")
    }
}

/// Full English month name for a 1-based month number
pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "unknown",
    }
}

pub(crate) fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// One ride, with calendar fields derived from the start time
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TripRecord {
    pub(crate) start_time: NaiveDateTime,
    /// Kept as text; only shown in raw output
    pub(crate) end_time: String,
    pub(crate) duration_secs: f64,
    pub(crate) start_station: String,
    pub(crate) end_station: String,
    pub(crate) user_type: Option<String>,
    pub(crate) gender: Option<String>,
    pub(crate) birth_year: Option<i32>,
    pub(crate) month: u32,
    pub(crate) day_of_week: Weekday,
}

impl TripRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        start_time: NaiveDateTime,
        end_time: String,
        duration_secs: f64,
        start_station: String,
        end_station: String,
        user_type: Option<String>,
        gender: Option<String>,
        birth_year: Option<i32>,
    ) -> Self {
        TripRecord {
            month: start_time.month(),
            day_of_week: start_time.weekday(),
            start_time,
            end_time,
            duration_secs,
            start_station,
            end_station,
            user_type,
            gender,
            birth_year,
        }
    }

    pub(crate) fn hour(&self) -> u32 {
        self.start_time.hour()
    }

    pub(crate) fn day_name(&self) -> &'static str {
        weekday_name(self.day_of_week)
    }
}

/// Ordered trips for one city
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TripTable {
    pub(crate) city: City,
    pub(crate) records: Vec<TripRecord>,
    /// Source file carried Gender and Birth Year columns
    pub(crate) has_demographics: bool,
}

impl TripTable {
    pub(crate) fn new(city: City, records: Vec<TripRecord>, has_demographics: bool) -> Self {
        TripTable {
            city,
            records,
            has_demographics,
        }
    }

    /// Derive a new table holding the matching rows in their original order
    pub(crate) fn filter(&self, filter: &Filter) -> TripTable {
        TripTable {
            city: self.city,
            records: self
                .records
                .iter()
                .filter(|r| filter.matches(r))
                .cloned()
                .collect(),
            has_demographics: self.has_demographics,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn head(&self, n: usize) -> &[TripRecord] {
        &self.records[..n.min(self.records.len())]
    }
}
