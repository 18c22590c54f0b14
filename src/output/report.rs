//! Console rendering of the trip reports
//!
//! Each section prints a title, its table (or the empty-filter notice),
//! the time it took and a separator line.

use std::io::{self, Write};
use std::time::Instant;

use comfy_table::{Cell, Color, ContentArrangement, Table};

use crate::consts::DATETIME_FORMAT;
use crate::core::{
    Demographics, TripRecord, TripTable, duration_stats, month_name, station_stats, time_stats,
    user_stats,
};
use crate::error::StatsError;
use crate::output::format::{
    format_count, format_hour, format_seconds, format_year, header, number_cell, report_table,
    value_cell,
};

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ReportOptions {
    pub(crate) use_color: bool,
}

impl ReportOptions {
    fn value_color(self) -> Option<Color> {
        self.use_color.then_some(Color::Green)
    }
}

fn separator<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(40))
}

fn print_title<W: Write>(out: &mut W, title: &str, opts: ReportOptions) -> io::Result<()> {
    if opts.use_color {
        writeln!(out, "\n\x1b[1;36m{title}\x1b[0m\n")
    } else {
        writeln!(out, "\n{title}\n")
    }
}

/// Two-column "Statistic | Value" table
fn stat_table(rows: &[(&str, String)], opts: ReportOptions) -> Table {
    let mut table = report_table(ContentArrangement::Dynamic);
    table.set_header(header(&["Statistic", "Value"], opts.use_color));
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), value_cell(value, opts.value_color())]);
    }
    table
}

/// "Category | Count" table for a value-count breakdown
fn count_table(label: &str, counts: &[(String, usize)], opts: ReportOptions) -> Table {
    let mut table = report_table(ContentArrangement::Dynamic);
    table.set_header(header(&[label, "Count"], opts.use_color));
    for (key, count) in counts {
        table.add_row(vec![Cell::new(key), number_cell(&format_count(*count))]);
    }
    table
}

/// Compute a section, render it, or print the empty-filter notice
fn print_section<W, T, C, R>(
    out: &mut W,
    title: &str,
    opts: ReportOptions,
    compute: C,
    render: R,
) -> io::Result<()>
where
    W: Write,
    C: FnOnce() -> Result<T, StatsError>,
    R: FnOnce(&mut W, T) -> io::Result<()>,
{
    print_title(out, title, opts)?;
    let start = Instant::now();
    match compute() {
        Ok(stats) => render(out, stats)?,
        Err(e) => writeln!(out, "{e}")?,
    }
    let ms = start.elapsed().as_secs_f64() * 1000.0;
    if opts.use_color {
        writeln!(out, "\nThis took \x1b[36m{ms:.2}ms\x1b[0m")?;
    } else {
        writeln!(out, "\nThis took {ms:.2}ms")?;
    }
    separator(out)
}

/// Raw trip rows, as shown by the load preview and the pager
pub(crate) fn print_rows<W: Write>(
    out: &mut W,
    rows: &[TripRecord],
    has_demographics: bool,
    opts: ReportOptions,
) -> io::Result<()> {
    let mut labels = vec![
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ];
    if has_demographics {
        labels.extend(["Gender", "Birth Year"]);
    }
    labels.extend(["Month", "Day"]);

    // Raw rows never wrap, like a dataframe dump
    let mut table = report_table(ContentArrangement::Disabled);
    table.set_header(header(&labels, opts.use_color));
    for r in rows {
        let mut row = vec![
            Cell::new(r.start_time.format(DATETIME_FORMAT).to_string()),
            Cell::new(&r.end_time),
            number_cell(&format_seconds(r.duration_secs)),
            Cell::new(&r.start_station),
            Cell::new(&r.end_station),
            Cell::new(r.user_type.as_deref().unwrap_or("")),
        ];
        if has_demographics {
            row.push(Cell::new(r.gender.as_deref().unwrap_or("")));
            row.push(Cell::new(format_year(r.birth_year)));
        }
        row.push(number_cell(&r.month.to_string()));
        row.push(Cell::new(r.day_name()));
        table.add_row(row);
    }
    writeln!(out, "{table}")
}

/// First rows of a freshly loaded table
pub(crate) fn print_preview<W: Write>(
    out: &mut W,
    table: &TripTable,
    rows: usize,
    opts: ReportOptions,
) -> io::Result<()> {
    writeln!(
        out,
        "{} trips loaded for {}.",
        format_count(table.len()),
        table.city.display_name()
    )?;
    if table.is_empty() {
        return writeln!(out, "{}", StatsError::EmptyResult);
    }
    writeln!(out, "First {} lines of data:", rows.min(table.len()))?;
    print_rows(out, table.head(rows), table.has_demographics, opts)
}

pub(crate) fn print_time_stats<W: Write>(
    out: &mut W,
    table: &TripTable,
    opts: ReportOptions,
) -> io::Result<()> {
    print_section(
        out,
        "Calculating The Most Frequent Times of Travel...",
        opts,
        || time_stats(table),
        |out, stats| {
            let rows = [
                ("Most common month", month_name(stats.common_month).to_string()),
                ("Most common day of week", stats.common_day.to_string()),
                ("Most common start hour", format_hour(stats.common_hour)),
            ];
            writeln!(out, "{}", stat_table(&rows, opts))
        },
    )
}

pub(crate) fn print_station_stats<W: Write>(
    out: &mut W,
    table: &TripTable,
    opts: ReportOptions,
) -> io::Result<()> {
    print_section(
        out,
        "Calculating The Most Popular Stations and Trip...",
        opts,
        || station_stats(table),
        |out, stats| {
            let rows = [
                ("Most commonly used start station", stats.common_start.clone()),
                ("Most commonly used end station", stats.common_end.clone()),
                ("Most frequent trip", stats.common_trip.clone()),
            ];
            writeln!(out, "{}", stat_table(&rows, opts))
        },
    )
}

pub(crate) fn print_duration_stats<W: Write>(
    out: &mut W,
    table: &TripTable,
    opts: ReportOptions,
) -> io::Result<()> {
    print_section(
        out,
        "Calculating Trip Duration...",
        opts,
        || duration_stats(table),
        |out, stats| {
            let rows = [
                ("Trips", format_count(stats.trips)),
                ("Total travel time", stats.total().to_string()),
                ("Total travel time (s)", format_seconds(stats.total_secs)),
                ("Mean travel time", stats.mean().to_string()),
                ("Mean travel time (s)", format_seconds(stats.mean_secs)),
            ];
            writeln!(out, "{}", stat_table(&rows, opts))
        },
    )
}

pub(crate) fn print_user_stats<W: Write>(
    out: &mut W,
    table: &TripTable,
    opts: ReportOptions,
) -> io::Result<()> {
    let city = table.city.display_name();
    print_section(
        out,
        "Calculating User Stats...",
        opts,
        || user_stats(table),
        |out, stats| {
            writeln!(out, "{}", count_table("User Type", &stats.user_types, opts))?;
            match stats.demographics {
                Demographics::Unavailable => {
                    writeln!(out, "\nNo gender or birth year data for {city}.")
                }
                Demographics::Available {
                    genders,
                    birth_years,
                } => {
                    writeln!(out, "\n{}", count_table("Gender", &genders, opts))?;
                    match birth_years {
                        Some(years) => {
                            let rows = [
                                ("Earliest year of birth", years.earliest.to_string()),
                                ("Most recent year of birth", years.most_recent.to_string()),
                                ("Most common year of birth", years.most_common.to_string()),
                            ];
                            writeln!(out, "\n{}", stat_table(&rows, opts))
                        }
                        None => writeln!(out, "\nNo birth year data for current filter."),
                    }
                }
            }
        },
    )
}

/// All four reports, in presentation order
pub(crate) fn print_reports<W: Write>(
    out: &mut W,
    table: &TripTable,
    opts: ReportOptions,
) -> io::Result<()> {
    print_time_stats(out, table, opts)?;
    print_station_stats(out, table, opts)?;
    print_duration_stats(out, table, opts)?;
    print_user_stats(out, table, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::City;
    use chrono::NaiveDateTime;

    fn trip(start: &str, duration: f64, gender: Option<&str>, year: Option<i32>) -> TripRecord {
        TripRecord::new(
            NaiveDateTime::parse_from_str(start, DATETIME_FORMAT).unwrap(),
            String::new(),
            duration,
            "Clark St".to_string(),
            "Canal St".to_string(),
            Some("Subscriber".to_string()),
            gender.map(str::to_string),
            year,
        )
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn chicago() -> TripTable {
        TripTable::new(
            City::Chicago,
            vec![
                trip("2017-06-23 15:09:32", 60.0, Some("Male"), Some(1992)),
                trip("2017-06-24 15:30:00", 120.0, Some("Female"), Some(1985)),
                trip("2017-05-25 08:00:00", 180.0, None, None),
            ],
            true,
        )
    }

    #[test]
    fn time_report_shows_modes() {
        let table = chicago();
        let text = render(|out| print_time_stats(out, &table, ReportOptions::default()));
        assert!(text.contains("Most Frequent Times of Travel"));
        assert!(text.contains("June"));
        assert!(text.contains("15:00"));
        assert!(text.contains("This took"));
    }

    #[test]
    fn station_report_joins_trip() {
        let table = chicago();
        let text = render(|out| print_station_stats(out, &table, ReportOptions::default()));
        assert!(text.contains("Clark St and Canal St"));
    }

    #[test]
    fn duration_report_decomposes() {
        let table = chicago();
        let text = render(|out| print_duration_stats(out, &table, ReportOptions::default()));
        assert!(text.contains("0 days, 0 hours, 6 minutes and 0 seconds"));
        assert!(text.contains("0 days, 0 hours, 2 minutes and 0 seconds"));
    }

    #[test]
    fn user_report_with_demographics() {
        let table = chicago();
        let text = render(|out| print_user_stats(out, &table, ReportOptions::default()));
        assert!(text.contains("Subscriber"));
        assert!(text.contains("Female"));
        assert!(text.contains("1985"));
        assert!(text.contains("1992"));
    }

    #[test]
    fn user_report_without_demographics() {
        let table = TripTable::new(
            City::Washington,
            vec![trip("2017-06-23 15:09:32", 60.0, None, None)],
            false,
        );
        let text = render(|out| print_user_stats(out, &table, ReportOptions::default()));
        assert!(text.contains("No gender or birth year data for Washington."));
    }

    #[test]
    fn empty_table_reports_no_data_everywhere() {
        let table = TripTable::new(City::NewYorkCity, Vec::new(), true);
        let text = render(|out| print_reports(out, &table, ReportOptions::default()));
        assert_eq!(text.matches("No data for current filter.").count(), 4);
    }

    #[test]
    fn preview_limits_rows() {
        let table = chicago();
        let text = render(|out| print_preview(out, &table, 2, ReportOptions::default()));
        assert!(text.contains("First 2 lines of data:"));
        assert!(text.contains("2017-06-23 15:09:32"));
        assert!(!text.contains("2017-05-25 08:00:00"));
    }

    #[test]
    fn rows_without_demographics_omit_columns() {
        let table = chicago();
        let text = render(|out| print_rows(out, table.head(1), false, ReportOptions::default()));
        assert!(!text.contains("Birth Year"));
        assert!(text.contains("Friday"));
    }

    #[test]
    fn reports_are_deterministic() {
        let table = chicago();
        let strip = |s: String| {
            s.lines()
                .filter(|l| !l.starts_with("This took"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let a = strip(render(|out| print_reports(out, &table, ReportOptions::default())));
        let b = strip(render(|out| print_reports(out, &table, ReportOptions::default())));
        assert_eq!(a, b);
    }
}
