// One scrape run: fetch -> extract -> (merge) -> export.
//
// `process` is the whole pipeline minus the network, so it can be driven
// from a string of HTML. `run` adds the fetch in front of it. Neither keeps
// any state between calls.

use std::path::Path;

use pagescrape_acquire::{extract_text, fetch_page, output};
use pagescrape_model::merge::{self, MergeResult};
use pagescrape_model::{Artifact, ExtractionRequest, OutputFormat, Result, Table, Upload};

/// How a run that didn't fail ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The selector matched nothing with visible text. A warning, not an error.
    NoData,
    Ready(Report),
}

#[derive(Debug)]
pub struct Report {
    /// The scraped values as a one-column `Extracted_Text` table.
    pub extracted: Table,
    /// Present when an existing table was supplied.
    pub merged: Option<MergeResult>,
    pub artifact: Artifact,
}

/// Fetch the page and run the pipeline on it.
///
/// If `cache_dir` is set the raw page is saved there first; failing to
/// save it is logged and otherwise ignored.
pub async fn run(
    request: &ExtractionRequest,
    upload: Option<&Upload>,
    format: OutputFormat,
    cache_dir: Option<&Path>,
) -> Result<RunOutcome> {
    tracing::info!(url = %request.url, selector = %request.selector, "Fetching page");
    let html = fetch_page(&request.url).await?;
    tracing::info!(bytes = html.len(), "Received HTML");

    if let Some(dir) = cache_dir {
        if let Err(e) = output::cache_html(dir, &html) {
            tracing::warn!(dir = %dir.display(), error = %e, "Could not cache raw HTML");
        }
    }

    process(request, &html, upload, format)
}

/// Extract, merge, and export from already-fetched page text.
pub fn process(
    request: &ExtractionRequest,
    html: &str,
    upload: Option<&Upload>,
    format: OutputFormat,
) -> Result<RunOutcome> {
    let values = extract_text(html, &request.selector);
    if values.is_empty() {
        tracing::warn!(selector = %request.selector, "No data found with the given input.");
        return Ok(RunOutcome::NoData);
    }
    tracing::info!(items = values.len(), "Scraped {} items.", values.len());

    let extracted = Table::single_column(&values);

    let merged = match upload {
        Some(upload) => {
            let existing = pagescrape_tabular::load_table(upload)?;
            let result = merge::merge(existing, &values);
            if result.stats.dropped > 0 {
                tracing::warn!(
                    dropped = result.stats.dropped,
                    rows = result.stats.rows,
                    "More items scraped than rows in the uploaded file; extra items dropped"
                );
            }
            tracing::info!(
                rows = result.stats.rows,
                padded = result.stats.padded,
                replaced_column = result.stats.replaced_column,
                "Merged scraped data into uploaded file."
            );
            Some(result)
        }
        None => None,
    };

    let table = merged.as_ref().map_or(&extracted, |m| &m.table);
    let artifact = pagescrape_tabular::export(table, format, merged.is_some())?;

    Ok(RunOutcome::Ready(Report {
        extracted,
        merged,
        artifact,
    }))
}
