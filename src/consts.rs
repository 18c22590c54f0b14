/// Start/End Time format used by the city files: "2017-06-23 15:09:32"
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Months covered by the datasets, in calendar order
pub(crate) const MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

/// Rows shown by the load preview and by each raw-data page
pub(crate) const WINDOW_SIZE: usize = 5;
