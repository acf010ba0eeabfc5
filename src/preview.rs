use crate::model::MergedTable;

/// Number of rows shown when no explicit preview size is requested.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Renders the first `rows` rows of the table as column-aligned text.
///
/// The leftmost column carries the row position and the last line states the
/// full shape of the table, e.g. `[12 rows x 3 columns]`.
pub fn render(table: &MergedTable, rows: usize) -> String {
    let head = table.head(rows);

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(head.len() + 1);
    let mut header = vec![String::new()];
    header.extend(table.columns.iter().cloned());
    grid.push(header);
    for (row_idx, row) in head.iter().enumerate() {
        let mut line = vec![row_idx.to_string()];
        line.extend(row.iter().map(ToString::to_string));
        grid.push(line);
    }

    let widths: Vec<usize> = (0..=table.columns.len())
        .map(|col_idx| {
            grid.iter()
                .filter_map(|line| line.get(col_idx))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines: Vec<String> = grid
        .iter()
        .map(|line| {
            line.iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:>width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect();

    lines.push(String::new());
    lines.push(format!(
        "[{} rows x {} columns]",
        table.row_count(),
        table.column_count()
    ));
    lines.join("\n")
}
