pub mod aggregator;
pub mod excel;
pub mod export;
pub mod extractor;

use bytes::Bytes;

use crate::error::AppError;
use crate::models::{Summary, SummaryReport};
use excel::Workbook;

/// Workbook to summary: extract and filter every sheet, coerce, then group by KASIR.
/// Any layout failure aborts the run and nothing is returned.
pub fn extract_summary(workbook: &Workbook) -> Result<Summary, AppError> {
    Ok(summarize(workbook)?.summary)
}

fn summarize(workbook: &Workbook) -> Result<SummaryReport, AppError> {
    let start = std::time::Instant::now();
    tracing::info!("Extracting summary from {} sheets", workbook.sheets.len());

    let raw = extractor::extract_rows(workbook)?;
    let rows = extractor::coerce_rows(raw);
    let row_count = rows.len();
    let summary = aggregator::aggregate(&rows)?;

    tracing::info!(
        "Summarized {} rows into {} cashiers in {:?}",
        row_count,
        summary.len(),
        start.elapsed()
    );

    Ok(SummaryReport {
        sheet_count: workbook.sheets.len(),
        row_count,
        summary,
    })
}

/// Reads an uploaded `.xlsx` file and summarizes it.
pub fn summarize_upload(file_data: Bytes) -> Result<SummaryReport, AppError> {
    let workbook = excel::read_workbook(file_data)?;
    summarize(&workbook)
}
