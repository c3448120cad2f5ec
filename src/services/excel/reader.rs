use std::io::Cursor;

use bytes::Bytes;
use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};

use super::types::{Sheet, Workbook};
use crate::error::AppError;

/// Decodes an uploaded `.xlsx` file into A1-anchored sheets, in workbook order.
pub fn read_workbook(file_data: Bytes) -> Result<Workbook, AppError> {
    let start = std::time::Instant::now();
    tracing::info!("Opening workbook ({}KB)", file_data.len() / 1024);

    let cursor = Cursor::new(file_data);
    let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor).map_err(|e| {
        tracing::error!("Failed to open Excel file: {}", e);
        AppError::FileProcessingError(format!("Failed to open Excel file: {}", e))
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    tracing::info!("Found {} sheets: {:?}", sheet_names.len(), sheet_names);

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in sheet_names {
        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            tracing::error!("Failed to read worksheet {}: {}", sheet_name, e);
            AppError::FileProcessingError(format!(
                "Failed to read worksheet '{}': {}",
                sheet_name, e
            ))
        })?;
        sheets.push(Sheet::new(sheet_name, anchor_at_a1(&range)));
    }

    tracing::info!("Workbook read in {:?}", start.elapsed());
    Ok(Workbook::new(sheets))
}

// calamine ranges start at the first used cell; pad so indexes are absolute.
fn anchor_at_a1(range: &Range<Data>) -> Vec<Vec<Data>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let (start_row, start_col) = (start_row as usize, start_col as usize);

    let mut grid: Vec<Vec<Data>> = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![Data::Empty; start_col];
        cells.extend(row.iter().cloned());
        grid.push(cells);
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook as XlsxWorkbook;

    #[test]
    fn reads_sheets_in_order_with_absolute_positions() {
        let mut book = XlsxWorkbook::new();
        let first = book.add_worksheet();
        first.set_name("Pagi").unwrap();
        // First used cell is B3; everything above and left must be padded.
        first.write_string(2, 1, "ANI").unwrap();
        first.write_number(2, 12, 100.0).unwrap();
        let second = book.add_worksheet();
        second.set_name("Malam").unwrap();
        second.write_string(0, 0, "header").unwrap();
        let bytes = book.save_to_buffer().unwrap();

        let workbook = read_workbook(Bytes::from(bytes)).unwrap();

        assert_eq!(workbook.sheet_names(), vec!["Pagi", "Malam"]);
        let pagi = &workbook.sheets[0];
        assert_eq!(pagi.row_count(), 3);
        assert_eq!(pagi.column_count(), 13);
        assert_eq!(pagi.cell(2, 1), &Data::String("ANI".to_string()));
        assert_eq!(pagi.cell(2, 12), &Data::Float(100.0));
        assert_eq!(pagi.cell(0, 0), &Data::Empty);
        assert_eq!(workbook.sheets[1].cell(0, 0), &Data::String("header".to_string()));
    }

    #[test]
    fn rejects_non_xlsx_bytes() {
        let err = read_workbook(Bytes::from_static(b"KASIR,STRUK\nA,1\n")).unwrap_err();
        assert!(matches!(err, AppError::FileProcessingError(_)));
    }
}
