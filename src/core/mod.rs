//! Core module - trip data model, loading, aggregation and paging

mod loader;
mod pager;
mod stats;
mod types;

pub(crate) use loader::{CityFiles, load};
pub(crate) use pager::RawPager;
pub(crate) use stats::{Demographics, duration_stats, station_stats, time_stats, user_stats};
pub(crate) use types::{
    City, DayFilter, Filter, MonthFilter, TripRecord, TripTable, month_name,
};
