use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid city \"{input}\" (expected chicago, new york city or washington)")]
    InvalidCity { input: String },

    #[error("Invalid month \"{input}\" (expected all or january through june)")]
    InvalidMonth { input: String },

    #[error("Invalid day \"{input}\" (expected all or monday through sunday)")]
    InvalidDay { input: String },

    #[error("No data file for {city}: {} not found", path.display())]
    MissingData { city: String, path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}, line {line}: {reason}", path.display())]
    InvalidRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the reporters themselves. Never fatal to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum StatsError {
    #[error("No data for current filter.")]
    EmptyResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display_city() {
        let e = AppError::InvalidCity {
            input: "boston".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Invalid city "boston" (expected chicago, new york city or washington)"#
        );
    }

    #[test]
    fn app_error_display_missing_data() {
        let e = AppError::MissingData {
            city: "washington".to_string(),
            path: PathBuf::from("data/washington.csv"),
        };
        assert_eq!(
            e.to_string(),
            "No data file for washington: data/washington.csv not found"
        );
    }

    #[test]
    fn app_error_display_invalid_row() {
        let e = AppError::InvalidRow {
            path: PathBuf::from("chicago.csv"),
            line: 7,
            reason: "bad start time".to_string(),
        };
        assert_eq!(e.to_string(), "chicago.csv, line 7: bad start time");
    }

    #[test]
    fn stats_error_display() {
        assert_eq!(
            StatsError::EmptyResult.to_string(),
            "No data for current filter."
        );
    }
}
