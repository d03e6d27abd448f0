use chrono::{DateTime, Utc};
use serde::Serialize;

pub const NO_DATE: &str = "No date";

/// Cells wider than this are cut and end in an ellipsis.
const MAX_CELL_WIDTH: usize = 48;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(|cell| clip(&cell)).collect())
        .collect();
    let widths = column_widths(headers, &rows);

    println!("{}", render_row(headers, &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("{}", rule.join("  "));
    for row in &rows {
        println!("{}", render_row(row, &widths));
    }
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .fold(h.chars().count(), usize::max)
        })
        .collect()
}

fn render_row<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<w$}", cell.as_ref(), w = *w))
        .collect();
    padded.join("  ").trim_end().to_string()
}

fn clip(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell.to_string();
    }
    let mut cut: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
    cut.push('…');
    cut
}

/// "Mar 5, 2026", or "No date".
pub fn format_date(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| NO_DATE.to_string(), |t| t.format("%b %-d, %Y").to_string())
}

/// "Mar 5, 2026 9:00 AM", or "No date".
pub fn format_datetime(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(
        || NO_DATE.to_string(),
        |t| t.format("%b %-d, %Y %-I:%M %p").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dates_render_like_the_list_view() {
        let t = Utc.with_ymd_and_hms(2026, 3, 5, 21, 7, 0).unwrap();
        assert_eq!(format_date(Some(t)), "Mar 5, 2026");
        assert_eq!(format_datetime(Some(t)), "Mar 5, 2026 9:07 PM");
        assert_eq!(format_date(None), "No date");
    }

    #[test]
    fn widths_count_characters() {
        let rows = vec![vec!["Café crème".to_string(), "x".to_string()]];
        assert_eq!(column_widths(&["TITLE", "ID"], &rows), vec![10, 2]);
    }

    #[test]
    fn rows_are_padded_and_trimmed() {
        let line = render_row(&["ab", "c"], &[4, 3]);
        assert_eq!(line, "ab    c");
    }

    #[test]
    fn long_cells_are_clipped() {
        let long = "y".repeat(60);
        let clipped = clip(&long);
        assert_eq!(clipped.chars().count(), MAX_CELL_WIDTH);
        assert!(clipped.ends_with('…'));
        assert_eq!(clip("short"), "short");
    }
}
