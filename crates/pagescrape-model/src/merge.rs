// Merge scraped values into an existing table as one extra column.
//
// Alignment is purely positional: row i of the table receives extracted
// value i. There is no key join and no header matching. When the lengths
// differ, the column is padded with missing cells or the extracted values
// are truncated, so the table's row count never changes.

use crate::table::{Cell, Table, MERGED_COLUMN};

/// Align `extracted` to exactly `len` cells.
///
/// Extra values beyond `len` are dropped; a shortfall is filled with `None`.
pub fn align(extracted: &[String], len: usize) -> Vec<Cell> {
    extracted
        .iter()
        .take(len)
        .cloned()
        .map(Some)
        .chain(std::iter::repeat(None))
        .take(len)
        .collect()
}

/// Merge extracted values into `existing` under the `Scraped_Data` column.
///
/// If the table already has a `Scraped_Data` column its values are replaced
/// in place; otherwise the column is appended at the end.
pub fn merge(mut existing: Table, extracted: &[String]) -> MergeResult {
    let rows = existing.len();
    let column = align(extracted, rows);

    let replaced = match existing.column_index(MERGED_COLUMN) {
        Some(idx) => {
            for (row, cell) in existing.rows.iter_mut().zip(column) {
                row[idx] = cell;
            }
            true
        }
        None => {
            existing.columns.push(MERGED_COLUMN.to_string());
            for (row, cell) in existing.rows.iter_mut().zip(column) {
                row.push(cell);
            }
            false
        }
    };

    MergeResult {
        table: existing,
        stats: MergeStats {
            extracted: extracted.len(),
            rows,
            padded: rows.saturating_sub(extracted.len()),
            dropped: extracted.len().saturating_sub(rows),
            replaced_column: replaced,
        },
    }
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    pub table: Table,
    pub stats: MergeStats,
}

/// Statistics about the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStats {
    pub extracted: usize,
    pub rows: usize,
    /// Rows that received a missing marker.
    pub padded: usize,
    /// Extracted values that did not fit.
    pub dropped: usize,
    /// The table already had a `Scraped_Data` column.
    pub replaced_column: bool,
}
