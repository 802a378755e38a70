//! Template rendering for CLI output using outstanding

use console::Style;
use outstanding::{render_auto, render_with_output, Theme};
use polyloclib::{LOCTable, TableRow};
use serde::Serialize;

/// Include template at compile time
const LOC_TABLE_TEMPLATE: &str = include_str!("../templates/loc_table.jinja");

/// Re-export OutputMode for callers
pub use outstanding::OutputMode;

/// Spaces the template puts between columns
const GAP: usize = 2;

/// Row data for template rendering (pre-formatted)
#[derive(Debug, Serialize)]
struct TemplateRow {
    /// Pre-padded label (left-aligned)
    label: String,
    /// Pre-padded cells (right-aligned)
    cells: Vec<String>,
}

/// Data context for the LOC table template
#[derive(Debug, Serialize)]
struct LocTableContext {
    /// Pre-padded "Language" header
    label_header: String,
    /// Pre-padded numeric column headers
    columns: Vec<String>,
    /// Separator line (dashes)
    separator: String,
    /// One row per language
    rows: Vec<TemplateRow>,
    /// Total row
    total: TemplateRow,
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new().add("category", Style::new().bold())
}

/// Column widths, label column first.
fn column_widths(table: &LOCTable) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.len()).collect();

    for row in table.rows.iter().chain(std::iter::once(&table.footer)) {
        if let Some(width) = widths.first_mut() {
            *width = (*width).max(row.label.chars().count());
        }
        for (width, value) in widths.iter_mut().skip(1).zip(&row.values) {
            *width = (*width).max(value.len());
        }
    }

    widths
}

fn to_template_row(row: &TableRow, widths: &[usize]) -> TemplateRow {
    let label_width = widths.first().copied().unwrap_or_default();
    TemplateRow {
        label: format!("{:<width$}", row.label, width = label_width),
        cells: row
            .values
            .iter()
            .zip(widths.iter().skip(1))
            .map(|(value, width)| format!("{:>width$}", value, width = width))
            .collect(),
    }
}

fn table_context(table: &LOCTable) -> LocTableContext {
    let widths = column_widths(table);
    let total_width = widths.iter().sum::<usize>() + GAP * widths.len().saturating_sub(1);
    let label_width = widths.first().copied().unwrap_or_default();
    let label_header = table.headers.first().map(String::as_str).unwrap_or_default();

    LocTableContext {
        label_header: format!("{:<width$}", label_header, width = label_width),
        columns: table
            .headers
            .iter()
            .skip(1)
            .zip(widths.iter().skip(1))
            .map(|(name, width)| format!("{:>width$}", name, width = width))
            .collect(),
        separator: "-".repeat(total_width),
        rows: table
            .rows
            .iter()
            .map(|row| to_template_row(row, &widths))
            .collect(),
        total: to_template_row(&table.footer, &widths),
    }
}

fn with_trailing_newline(mut rendered: String) -> String {
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    rendered
}

/// Render the table framed by separator lines.
pub fn render_table(
    table: &LOCTable,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    let theme = create_theme();
    let context = table_context(table);
    let rendered = render_with_output(LOC_TABLE_TEMPLATE, &context, &theme, output_mode)?;
    Ok(with_trailing_newline(rendered))
}

/// Render a count table using outstanding's auto dispatch
pub fn render_count(
    table: &LOCTable,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    // For JSON mode, use outstanding's render_auto for serialization
    if matches!(output_mode, OutputMode::Json) {
        let theme = create_theme();
        let rendered = render_auto(LOC_TABLE_TEMPLATE, table, &theme, output_mode)?;
        return Ok(with_trailing_newline(rendered));
    }

    render_table(table, output_mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyloclib::{CountResult, WorkItem};

    fn sample_table() -> LOCTable {
        let mut result = CountResult::new();
        let mut go = WorkItem::new("main.go", "main.go", "go", "Go");
        go.lines = 1;
        go.bytes = 13;
        let mut md = WorkItem::new("readme.md", "readme.md", "md", "Markdown");
        md.lines = 3;
        md.blank = 1;
        md.bytes = 10;
        result.add_item(&go);
        result.add_item(&md);
        LOCTable::from_count(&result)
    }

    fn plain(table: &LOCTable) -> Vec<String> {
        let rendered = render_table(table, OutputMode::Text).unwrap();
        console::strip_ansi_codes(&rendered)
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_layout_has_four_separators() {
        let lines = plain(&sample_table());

        assert_eq!(lines.len(), 7);
        for index in [0, 2, 5, 6] {
            assert!(lines[index].chars().all(|c| c == '-'), "line {index}");
        }
        assert!(lines[1].starts_with("Language"));
        assert!(lines[3].starts_with("Go "));
        assert!(lines[4].starts_with("Markdown"));
    }

    #[test]
    fn test_all_lines_share_width() {
        let lines = plain(&sample_table());

        let width = lines[0].len();
        assert!(lines.iter().all(|line| line.len() == width));
    }

    #[test]
    fn test_numbers_right_aligned() {
        let lines = plain(&sample_table());
        let footer = lines.iter().find(|l| l.starts_with("Total")).unwrap();

        assert!(footer.ends_with("23"));
        assert!(lines[3].ends_with("13"));
        assert!(lines[4].ends_with("10"));
    }

    #[test]
    fn test_empty_table() {
        let lines = plain(&LOCTable::from_count(&CountResult::new()));

        assert_eq!(lines.len(), 6);
        assert!(lines[4].starts_with("Total"));
    }

    #[test]
    fn test_column_widths() {
        let widths = column_widths(&sample_table());

        // "Language" and "Markdown" are both 8 wide; "Comment" is 7
        assert_eq!(widths, vec![8, 5, 5, 4, 7, 5, 5]);
    }

    #[test]
    fn test_context_is_pre_padded() {
        let context = table_context(&sample_table());

        assert_eq!(context.label_header, "Language");
        assert_eq!(context.columns[0], "Files");
        assert_eq!(context.total.label, "Total   ");
        assert_eq!(context.rows[0].cells[5], "   13");
        assert_eq!(context.separator.len(), 51);
    }

    #[test]
    fn test_json_mode_serializes_table() {
        let rendered = render_count(&sample_table(), OutputMode::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(json["footer"]["label"], "Total");
        assert_eq!(json["rows"][1]["label"], "Markdown");
    }
}
