mod format;
mod report;

pub(crate) use report::{ReportOptions, print_preview, print_reports, print_rows};
