use std::io::{BufRead, Write};

use crate::cli::Prompter;
use crate::consts::WINDOW_SIZE;
use crate::core::{City, CityFiles, Filter, RawPager, TripTable, load};
use crate::error::AppError;
use crate::output::{ReportOptions, print_preview, print_reports, print_rows};

/// Load, preview and report on one city/filter selection
fn explore<W: Write>(
    out: &mut W,
    files: &CityFiles,
    city: City,
    filter: &Filter,
    opts: ReportOptions,
) -> Result<TripTable, AppError> {
    tracing::info!(city = city.name(), filter = %filter.describe(), "exploring");
    let table = load(files, city, filter)?;
    print_preview(out, &table, WINDOW_SIZE, opts)?;
    print_reports(out, &table, opts)?;
    Ok(table)
}

/// Non-interactive mode: a single round with no prompts
pub(crate) fn run_once<W: Write>(
    out: &mut W,
    files: &CityFiles,
    city: City,
    filter: Filter,
    opts: ReportOptions,
) -> Result<(), AppError> {
    explore(out, files, city, &filter, opts)?;
    Ok(())
}

/// Page through raw rows until the user declines or the rows run out.
/// Returns false when input ended.
fn page_raw_rows<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    table: &TripTable,
    pager: &mut RawPager,
    opts: ReportOptions,
) -> Result<bool, AppError> {
    let question = format!("Would you like to see {WINDOW_SIZE} lines of raw data? Enter yes or no.");
    loop {
        match prompter.confirm(&question)? {
            Some(true) => {
                let start = pager.cursor();
                let window = pager.next(table);
                let out = prompter.output();
                if window.is_empty() {
                    writeln!(out, "\nNo more raw data to display.")?;
                    return Ok(true);
                }
                writeln!(
                    out,
                    "\nRows {}-{} of {}:",
                    start + 1,
                    start + window.len(),
                    table.len()
                )?;
                print_rows(out, window, table.has_demographics, opts)?;
            }
            Some(false) => return Ok(true),
            None => return Ok(false),
        }
    }
}

/// Interactive mode: prompt → load → reports → raw rows → restart?
pub(crate) fn run_interactive<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    files: &CityFiles,
    opts: ReportOptions,
) -> Result<(), AppError> {
    prompter.greet()?;
    let mut pager = RawPager::new();
    loop {
        let Some((city, filter)) = prompter.ask_filters()? else {
            return Ok(());
        };
        let table = explore(prompter.output(), files, city, &filter, opts)?;

        pager.reset();
        if !page_raw_rows(prompter, &table, &mut pager, opts)? {
            return Ok(());
        }

        match prompter.confirm("Would you like to restart? Enter yes or no.")? {
            Some(true) => continue,
            _ => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    const WASHINGTON_HEADER: &str = ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n";

    fn data_dir(rows: usize) -> TempDir {
        let dir = TempDir::new().unwrap();
        let mut csv = WASHINGTON_HEADER.to_string();
        for i in 0..rows {
            csv.push_str(&format!(
                "{i},2017-01-0{} 09:00:00,2017-01-0{} 09:10:00,600,Station {i},Dock,Subscriber\n",
                i % 9 + 1,
                i % 9 + 1
            ));
        }
        fs::write(dir.path().join("washington.csv"), csv).unwrap();
        dir
    }

    fn session(input: &str, dir: &TempDir) -> (Result<(), AppError>, String) {
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let result = run_interactive(
            &mut prompter,
            &CityFiles::new(dir.path()),
            ReportOptions::default(),
        );
        let out = String::from_utf8(prompter.output().clone()).unwrap();
        (result, out)
    }

    #[test]
    fn full_round_then_exit() {
        let dir = data_dir(3);
        let (result, out) = session("washington\nnone\nno\nno\n", &dir);
        result.unwrap();
        assert!(out.contains("Hello! Let's explore some US bikeshare data!"));
        assert!(out.contains("3 trips loaded for Washington."));
        assert!(out.contains("No gender or birth year data for Washington."));
        assert!(out.contains("Would you like to restart?"));
    }

    #[test]
    fn raw_rows_page_until_exhausted() {
        let dir = data_dir(7);
        let (result, out) = session("washington\nnone\nyes\nyes\nyes\nno\n", &dir);
        result.unwrap();
        assert!(out.contains("Rows 1-5 of 7:"));
        assert!(out.contains("Rows 6-7 of 7:"));
        assert!(out.contains("No more raw data to display."));
        assert!(out.contains("Station 6"));
    }

    #[test]
    fn restart_resets_pager() {
        let dir = data_dir(7);
        let input = "washington\nnone\nyes\nno\nyes\nwashington\nnone\nyes\nno\nno\n";
        let (result, out) = session(input, &dir);
        result.unwrap();
        assert_eq!(out.matches("Rows 1-5 of 7:").count(), 2);
        assert!(!out.contains("Rows 6-7 of 7:"));
    }

    #[test]
    fn empty_filter_reports_no_data() {
        let dir = data_dir(3);
        let (result, out) = session("washington\nmonth\njune\nno\nno\n", &dir);
        result.unwrap();
        assert!(out.contains("0 trips loaded for Washington."));
        assert!(out.matches("No data for current filter.").count() >= 4);
    }

    #[test]
    fn missing_city_file_is_fatal() {
        let dir = data_dir(1);
        let (result, _) = session("chicago\nnone\n", &dir);
        assert!(matches!(result, Err(AppError::MissingData { .. })));
    }

    #[test]
    fn run_once_prints_reports() {
        let dir = data_dir(2);
        let mut out = Vec::new();
        run_once(
            &mut out,
            &CityFiles::new(dir.path()),
            City::Washington,
            Filter::default(),
            ReportOptions::default(),
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Calculating Trip Duration..."));
        assert!(text.contains("0 days, 0 hours, 20 minutes and 0 seconds"));
    }
}
