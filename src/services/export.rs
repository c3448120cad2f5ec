use csv::{ReaderBuilder, WriterBuilder};

use crate::error::AppError;
use crate::models::{format_total, Summary, SummaryRecord};

pub const CSV_FILE_NAME: &str = "summary_grouped.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

const HEADER: [&str; 3] = ["KASIR", "total_struk", "negative_selisih_count"];

/// Writes the summary with a header row and no index column. Totals use
/// [`format_total`] so the file matches the HTML table.
pub fn to_csv(summary: &Summary) -> Result<Vec<u8>, AppError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for record in &summary.rows {
        writer.write_record([
            record.kasir.clone(),
            format_total(record.total_struk),
            record.negative_selisih_count.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Csv(format!("Failed to flush CSV: {}", e)))
}

pub fn from_csv(data: &[u8]) -> Result<Summary, AppError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(data);
    let rows = reader
        .deserialize::<SummaryRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Summary::new(rows))
}
