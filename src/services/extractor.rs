use crate::models::{RawRow, RowRecord};
use crate::services::excel::layout::{self, LayoutError};
use crate::services::excel::utils::{cell_key, is_missing, to_numeric};
use crate::services::excel::{Sheet, Workbook};

/// Selects KASIR, SELISIH and STRUK from every data row of every sheet,
/// dropping rows where any of the three is missing. Sheet order then row order
/// is preserved. The first sheet that breaks the layout aborts the whole run.
pub fn extract_rows(workbook: &Workbook) -> Result<Vec<RawRow>, LayoutError> {
    let mut combined = Vec::new();

    for sheet in &workbook.sheets {
        layout::validate(sheet).map_err(|e| {
            tracing::error!("Rejecting workbook: {}", e);
            e
        })?;

        let rows = extract_sheet(sheet);
        tracing::info!("Sheet {}: kept {} rows", sheet.name, rows.len());
        combined.extend(rows);
    }

    Ok(combined)
}

fn extract_sheet(sheet: &Sheet) -> Vec<RawRow> {
    let mut kept = Vec::new();
    let mut dropped = 0usize;

    for row in layout::FIRST_DATA_ROW..sheet.row_count() {
        let kasir = sheet.cell(row, layout::KASIR_COL);
        let selisih = sheet.cell(row, layout::SELISIH_COL);
        let struk = sheet.cell(row, layout::STRUK_COL);

        if is_missing(kasir) || is_missing(selisih) || is_missing(struk) {
            dropped += 1;
            continue;
        }

        kept.push(RawRow {
            kasir: cell_key(kasir),
            selisih: selisih.clone(),
            struk: struk.clone(),
            sheet: sheet.name.clone(),
        });
    }

    tracing::debug!("Sheet {}: dropped {} incomplete rows", sheet.name, dropped);
    kept
}

/// Converts SELISIH and STRUK to numbers. Values that do not parse become
/// `None`; the row itself is kept.
pub fn coerce_rows(rows: Vec<RawRow>) -> Vec<RowRecord> {
    rows.into_iter()
        .map(|row| {
            let selisih = to_numeric(&row.selisih);
            let struk = to_numeric(&row.struk);
            if selisih.is_none() || struk.is_none() {
                tracing::debug!(
                    "Non-numeric value for KASIR {} on sheet {}: SELISIH={}, STRUK={}",
                    row.kasir,
                    row.sheet,
                    row.selisih,
                    row.struk
                );
            }
            RowRecord {
                kasir: row.kasir,
                selisih,
                struk,
                sheet: row.sheet,
            }
        })
        .collect()
}
