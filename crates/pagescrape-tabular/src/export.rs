use pagescrape_model::{Artifact, HarvestError, OutputFormat, Result, Table};
use rust_xlsxwriter::{Format, Workbook};

/// Serialize a table into a downloadable artifact.
///
/// `merged` only affects the file name (`merged_output.*` vs `scraped_data.*`).
/// No index column is written in either format.
pub fn export(table: &Table, format: OutputFormat, merged: bool) -> Result<Artifact> {
    let bytes = match format {
        OutputFormat::Csv => to_csv(table)?,
        OutputFormat::Excel => to_xlsx(table)?,
    };

    let artifact = Artifact {
        file_name: format.file_name(merged),
        mime: format.mime(),
        bytes,
    };
    tracing::debug!(
        file = %artifact.file_name,
        mime = artifact.mime,
        bytes = artifact.bytes.len(),
        "Serialized table"
    );
    Ok(artifact)
}

/// Header row then records, `\n` terminated. Missing cells become empty fields.
pub fn to_csv(table: &Table) -> Result<Vec<u8>> {
    // Always `\n`, so output is identical on every platform
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(&table.columns).map_err(export_error)?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))
            .map_err(export_error)?;
    }

    writer.into_inner().map_err(export_error)
}

/// Single-sheet workbook with a bold header row. Missing cells stay blank.
pub fn to_xlsx(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, name) in table.columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, column_number(col)?, name, &header_format)
            .map_err(export_error)?;
    }

    for (idx, row) in table.rows.iter().enumerate() {
        let row_num = u32::try_from(idx + 1)
            .map_err(|_| HarvestError::Export(format!("row {idx} exceeds worksheet limits")))?;
        for (col, cell) in row.iter().enumerate() {
            if let Some(value) = cell {
                worksheet
                    .write_string(row_num, column_number(col)?, value)
                    .map_err(export_error)?;
            }
        }
    }

    workbook.save_to_buffer().map_err(export_error)
}

fn column_number(col: usize) -> Result<u16> {
    u16::try_from(col)
        .map_err(|_| HarvestError::Export(format!("column {col} exceeds worksheet limits")))
}

fn export_error(err: impl std::fmt::Display) -> HarvestError {
    HarvestError::Export(err.to_string())
}
