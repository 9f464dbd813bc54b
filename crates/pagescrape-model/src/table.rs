/// A single table value. `None` is the missing marker (a blank cell on export).
pub type Cell = Option<String>;

/// Column header of a freshly scraped table.
pub const EXTRACTED_COLUMN: &str = "Extracted_Text";

/// Column appended to an existing table on merge.
pub const MERGED_COLUMN: &str = "Scraped_Data";

/// An in-memory table of string cells.
///
/// Every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build the one-column `Extracted_Text` table from scraped values.
    pub fn single_column(values: &[String]) -> Self {
        Self {
            columns: vec![EXTRACTED_COLUMN.to_string()],
            rows: values.iter().map(|v| vec![Some(v.clone())]).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[idx].clone()).collect())
    }

    /// Append a row, padding with missing cells or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_column() {
        let table = Table::single_column(&["Title1".into(), "Title2".into(), "Title3".into()]);
        assert_eq!(table.columns, vec![EXTRACTED_COLUMN]);
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.column(EXTRACTED_COLUMN).unwrap(),
            vec![Some("Title1".into()), Some("Title2".into()), Some("Title3".into())]
        );
    }

    #[test]
    fn test_push_row_pads_short_rows() {
        let mut table = Table::new(vec!["a".into(), "b".into(), "c".into()]);
        table.push_row(vec![Some("1".into())]);
        assert_eq!(table.rows[0], vec![Some("1".into()), None, None]);
    }

    #[test]
    fn test_missing_column() {
        let table = Table::new(vec!["a".into()]);
        assert!(table.column("b").is_none());
        assert!(table.is_empty());
    }
}
