use thiserror::Error;

/// Failures that end a scrape run.
///
/// Finding nothing on the page is not one of these; see `RunOutcome::NoData`
/// in the CLI.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Network, DNS, or HTTP status failure while retrieving the page.
    #[error("failed to fetch page: {0}")]
    Fetch(String),

    /// The response body could not be read or decoded as text.
    #[error("failed to parse page: {0}")]
    Parse(String),

    /// The uploaded file's extension is neither `.csv` nor `.xlsx`.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The uploaded file could not be read as a table.
    #[error("failed to read table: {0}")]
    Table(String),

    /// The result table could not be serialized.
    #[error("failed to export table: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, HarvestError>;
