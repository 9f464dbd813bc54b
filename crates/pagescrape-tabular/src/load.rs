use calamine::{Data, Reader, Xlsx};
use pagescrape_model::{Cell, HarvestError, Result, Table, Upload};
use std::io::Cursor;
use std::path::Path;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";

/// Tabular formats accepted for an existing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Xlsx,
}

impl TableFormat {
    /// Pick the loader from a file name's extension (case-insensitive).
    pub fn from_file_name(name: &str) -> Result<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv") => Ok(TableFormat::Csv),
            Some("xlsx") => Ok(TableFormat::Xlsx),
            _ => Err(HarvestError::UnsupportedFormat(name.to_string())),
        }
    }
}

/// Load an uploaded CSV or `.xlsx` file into a table.
///
/// The first row is always the header. Empty cells load as missing.
pub fn load_table(upload: &Upload) -> Result<Table> {
    let format = TableFormat::from_file_name(&upload.name)?;
    let table = match format {
        TableFormat::Csv => read_csv(&upload.bytes)?,
        TableFormat::Xlsx => read_xlsx(&upload.bytes)?,
    };

    tracing::info!(
        file = %upload.name,
        columns = table.columns.len(),
        rows = table.len(),
        "Loaded existing table"
    );
    Ok(table)
}

fn read_csv(bytes: &[u8]) -> Result<Table> {
    let bytes = bytes.strip_prefix(UTF8_BOM.as_slice()).unwrap_or(bytes);

    // flexible: short records are padded below instead of rejected
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers().map_err(table_error)?;
    if headers.is_empty() {
        return Err(HarvestError::Table("CSV file has no header row".into()));
    }
    let mut table = Table::new(header_names(headers.iter().map(non_empty)));

    for record in reader.records() {
        let record = record.map_err(table_error)?;
        if record.len() > table.columns.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(HarvestError::Table(format!(
                "line {line}: expected {} fields, found {}",
                table.columns.len(),
                record.len()
            )));
        }
        table.push_row(record.iter().map(non_empty).collect());
    }

    Ok(table)
}

fn read_xlsx(bytes: &[u8]) -> Result<Table> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(table_error)?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(table_error)?,
        None => {
            tracing::warn!("Workbook has no worksheets");
            return Ok(Table::default());
        }
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };

    let mut table = Table::new(header_names(header.iter().map(cell_text)));
    for row in rows {
        table.push_row(row.iter().map(cell_text).collect());
    }

    Ok(table)
}

/// Name blank header cells "Unnamed: {index}" so every column is addressable.
fn header_names(cells: impl Iterator<Item = Cell>) -> Vec<String> {
    cells
        .enumerate()
        .map(|(i, cell)| cell.unwrap_or_else(|| format!("Unnamed: {i}")))
        .collect()
}

/// Display text for a worksheet cell. Dates are rendered as timestamps
/// rather than Excel serial numbers.
fn cell_text(cell: &Data) -> Cell {
    match cell {
        Data::Empty => None,
        Data::String(s) => non_empty(s),
        Data::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(dt) => Some(
            dt.as_datetime()
                .map(|d| d.format(DATETIME_FORMAT).to_string())
                .unwrap_or_else(|| dt.as_f64().to_string()),
        ),
        Data::DateTimeIso(s) | Data::DurationIso(s) => non_empty(s),
        other => Some(other.to_string()),
    }
}

fn non_empty(field: &str) -> Cell {
    (!field.is_empty()).then(|| field.to_string())
}

fn table_error(err: impl std::fmt::Display) -> HarvestError {
    HarvestError::Table(err.to_string())
}
