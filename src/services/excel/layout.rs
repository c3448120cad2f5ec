//! Fixed column layout of a cashier recap sheet.
//!
//! Row 0 holds the column headers and is followed by three banner rows, so
//! cashier data starts at row index 4. Columns are read by position only;
//! header text is never inspected.

use super::types::Sheet;

/// Column B.
pub const KASIR_COL: usize = 1;
/// Column L.
pub const SELISIH_COL: usize = 11;
/// Column M.
pub const STRUK_COL: usize = 12;

/// A sheet narrower than this cannot hold the STRUK column.
pub const REQUIRED_COLUMNS: usize = STRUK_COL + 1;

pub const HEADER_ROW: usize = 0;
/// Rows below the header row that carry titles rather than data.
pub const BANNER_ROWS: usize = 3;
pub const FIRST_DATA_ROW: usize = HEADER_ROW + 1 + BANNER_ROWS;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("sheet '{sheet}' has {found} columns, expected at least {required}")]
    TooFewColumns {
        sheet: String,
        found: usize,
        required: usize,
    },
    #[error("sheet '{sheet}' has {found} rows below the header, expected at least {required}")]
    TooFewRows {
        sheet: String,
        found: usize,
        required: usize,
    },
}

/// Checks the sheet is wide and tall enough before any column is sliced.
pub fn validate(sheet: &Sheet) -> Result<(), LayoutError> {
    let columns = sheet.column_count();
    if columns < REQUIRED_COLUMNS {
        return Err(LayoutError::TooFewColumns {
            sheet: sheet.name.clone(),
            found: columns,
            required: REQUIRED_COLUMNS,
        });
    }

    let body_rows = sheet.row_count().saturating_sub(HEADER_ROW + 1);
    if body_rows < BANNER_ROWS {
        return Err(LayoutError::TooFewRows {
            sheet: sheet.name.clone(),
            found: body_rows,
            required: BANNER_ROWS,
        });
    }

    Ok(())
}
