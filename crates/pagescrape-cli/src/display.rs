use pagescrape_model::Table;

const MAX_CELL_WIDTH: usize = 40;
const MISSING: &str = "<NA>";

/// Render the first `max_rows` rows of a table as aligned text columns.
///
/// Newlines inside cells are flattened and long cells are cut with "...".
pub fn render_preview(table: &Table, max_rows: usize) -> String {
    let shown = table.rows.len().min(max_rows);

    let header: Vec<String> = table.columns.iter().map(|c| clip(c)).collect();
    let body: Vec<Vec<String>> = table.rows[..shown]
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| clip(cell.as_deref().unwrap_or(MISSING)))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    for row in &body {
        push_line(&mut out, row, &widths);
    }
    if shown < table.rows.len() {
        out.push_str(&format!("... {} more rows\n", table.rows.len() - shown));
    }
    out.push_str(&format!("[{} rows x {} columns]\n", table.rows.len(), table.columns.len()));
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn clip(text: &str) -> String {
    let flat = text.replace(['\r', '\n'], " ");
    if flat.chars().count() <= MAX_CELL_WIDTH {
        return flat;
    }
    let cut: String = flat.chars().take(MAX_CELL_WIDTH - 3).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_aligns_columns() {
        let mut table = Table::new(vec!["Name".into(), "Scraped_Data".into()]);
        table.push_row(vec![Some("Ada".into()), Some("A".into())]);
        table.push_row(vec![Some("Grace Hopper".into()), None]);

        let preview = render_preview(&table, 10);
        let lines: Vec<&str> = preview.lines().collect();

        assert_eq!(lines[0], "Name          Scraped_Data");
        assert_eq!(lines[1], "Ada           A");
        assert_eq!(lines[2], "Grace Hopper  <NA>");
        assert_eq!(lines[3], "[2 rows x 2 columns]");
    }

    #[test]
    fn test_preview_limits_rows() {
        let values: Vec<String> = (0..5).map(|i| format!("v{i}")).collect();
        let preview = render_preview(&Table::single_column(&values), 2);

        assert!(preview.contains("v1"));
        assert!(!preview.contains("v2"));
        assert!(preview.contains("... 3 more rows"));
    }

    #[test]
    fn test_clip_long_and_multiline_cells() {
        assert_eq!(clip("a\nb"), "a b");
        let long = "x".repeat(100);
        let clipped = clip(&long);
        assert_eq!(clipped.chars().count(), MAX_CELL_WIDTH);
        assert!(clipped.ends_with("..."));
    }
}
