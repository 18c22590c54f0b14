//! Text and cell formatting shared by the report tables

use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table,
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL_CONDENSED,
};

/// Trip count with comma grouping, e.g. "238,889"
pub(super) fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Seconds with one decimal, e.g. "1,234.5"
pub(super) fn format_seconds(secs: f64) -> String {
    if !secs.is_finite() {
        return "N/A".to_string();
    }
    let tenths = (secs.abs() * 10.0).round() as u64;
    let sign = if secs < 0.0 && tenths > 0 { "-" } else { "" };
    let whole = usize::try_from(tenths / 10).unwrap_or(usize::MAX);
    format!("{sign}{}.{}", format_count(whole), tenths % 10)
}

/// Start hour as a clock label, e.g. "08:00"
pub(super) fn format_hour(hour: u32) -> String {
    format!("{hour:02}:00")
}

/// Birth year cell text; blank when the rider left it out
pub(super) fn format_year(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_default()
}

/// Bordered report table. Stat tables wrap to the terminal, raw rows don't.
pub(super) fn report_table(arrangement: ContentArrangement) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(arrangement);
    table
}

/// Bold header row, cyan when color is on
pub(super) fn header(labels: &[&str], use_color: bool) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| {
            let cell = Cell::new(label).add_attribute(Attribute::Bold);
            if use_color { cell.fg(Color::Cyan) } else { cell }
        })
        .collect()
}

pub(super) fn value_cell(text: &str, color: Option<Color>) -> Cell {
    match color {
        Some(c) => Cell::new(text).fg(c),
        None => Cell::new(text),
    }
}

/// Right-aligned numeric cell
pub(super) fn number_cell(text: &str) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(238_889), "238,889");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn seconds_one_decimal() {
        assert_eq!(format_seconds(120.0), "120.0");
        assert_eq!(format_seconds(1234.56), "1,234.6");
        assert_eq!(format_seconds(f64::NAN), "N/A");
    }

    #[test]
    fn seconds_keep_sign_below_one() {
        assert_eq!(format_seconds(-0.5), "-0.5");
        assert_eq!(format_seconds(-1234.5), "-1,234.5");
        assert_eq!(format_seconds(-0.04), "0.0");
    }

    #[test]
    fn hour_and_year_labels() {
        assert_eq!(format_hour(8), "08:00");
        assert_eq!(format_hour(17), "17:00");
        assert_eq!(format_year(Some(1992)), "1992");
        assert_eq!(format_year(None), "");
    }

    #[test]
    fn table_renders_header_and_cells() {
        let mut table = report_table(ContentArrangement::Disabled);
        table.set_header(header(&["Gender", "Count"], false));
        table.add_row(vec![value_cell("Female", None), number_cell("1,234")]);
        let text = table.to_string();
        assert!(text.contains("Gender"));
        assert!(text.contains("Female"));
        assert!(text.contains("1,234"));
    }
}
