use polars::prelude::*;

use crate::models::{
    RowRecord, Summary, SummaryRecord, KASIR, NEGATIVE_SELISIH_COUNT, SELISIH, SHEET, STRUK,
    TOTAL_STRUK,
};

/// Combined row table with columns KASIR, SELISIH, STRUK and Sheet.
pub fn rows_to_dataframe(rows: &[RowRecord]) -> PolarsResult<DataFrame> {
    let kasir: Vec<&str> = rows.iter().map(|r| r.kasir.as_str()).collect();
    let selisih: Vec<Option<f64>> = rows.iter().map(|r| r.selisih).collect();
    let struk: Vec<Option<f64>> = rows.iter().map(|r| r.struk).collect();
    let sheet: Vec<&str> = rows.iter().map(|r| r.sheet.as_str()).collect();

    DataFrame::new(vec![
        Series::new(KASIR, kasir),
        Series::new(SELISIH, selisih),
        Series::new(STRUK, struk),
        Series::new(SHEET, sheet),
    ])
}

/// Groups by KASIR: STRUK is summed with nulls as zero, and rows with a
/// negative SELISIH are counted. Output is sorted by KASIR.
pub fn group_by_kasir(df: DataFrame) -> PolarsResult<DataFrame> {
    df.lazy()
        .group_by([col(KASIR)])
        .agg([
            col(STRUK).sum().fill_null(lit(0.0)).alias(TOTAL_STRUK),
            col(SELISIH)
                .lt(lit(0.0))
                .sum()
                .cast(DataType::UInt64)
                .fill_null(lit(0u64))
                .alias(NEGATIVE_SELISIH_COUNT),
        ])
        .sort(KASIR, SortOptions::default())
        .collect()
}

pub fn dataframe_to_summary(df: &DataFrame) -> PolarsResult<Summary> {
    let kasir = df.column(KASIR)?.str()?;
    let total_struk = df.column(TOTAL_STRUK)?.f64()?;
    let negative = df.column(NEGATIVE_SELISIH_COUNT)?.u64()?;

    let rows = kasir
        .into_iter()
        .zip(total_struk.into_iter())
        .zip(negative.into_iter())
        .map(|((kasir, total), count)| {
            SummaryRecord::new(kasir.unwrap_or_default(), total.unwrap_or(0.0), count.unwrap_or(0))
        })
        .collect();

    Ok(Summary::new(rows))
}

pub fn aggregate(rows: &[RowRecord]) -> PolarsResult<Summary> {
    let df = rows_to_dataframe(rows)?;
    tracing::debug!("Combined frame: {} rows x {} columns", df.height(), df.width());
    let grouped = group_by_kasir(df)?;
    dataframe_to_summary(&grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kasir: &str, selisih: Option<f64>, struk: Option<f64>) -> RowRecord {
        RowRecord {
            kasir: kasir.to_string(),
            selisih,
            struk,
            sheet: "Pagi".to_string(),
        }
    }

    #[test]
    fn sums_struk_and_counts_negative_selisih() {
        let summary = aggregate(&[
            row("A", Some(-5.0), Some(100.0)),
            row("B", Some(-1.0), Some(20.0)),
            row("A", Some(3.0), Some(50.0)),
        ])
        .unwrap();

        assert_eq!(
            summary.rows,
            vec![SummaryRecord::new("A", 150.0, 1), SummaryRecord::new("B", 20.0, 1)]
        );
    }

    #[test]
    fn missing_values_contribute_nothing() {
        let summary = aggregate(&[
            row("A", None, Some(10.0)),
            row("A", Some(-2.0), None),
            row("C", None, None),
        ])
        .unwrap();

        assert_eq!(
            summary.rows,
            vec![SummaryRecord::new("A", 10.0, 1), SummaryRecord::new("C", 0.0, 0)]
        );
    }

    #[test]
    fn zero_selisih_is_not_negative() {
        let summary = aggregate(&[row("A", Some(0.0), Some(1.0)), row("A", Some(-0.5), Some(1.0))]).unwrap();
        assert_eq!(summary.rows, vec![SummaryRecord::new("A", 2.0, 1)]);
    }

    #[test]
    fn infinite_struk_makes_total_infinite() {
        let summary = aggregate(&[row("A", Some(1.0), Some(f64::INFINITY)), row("A", Some(1.0), Some(5.0))]).unwrap();
        assert_eq!(summary.rows, vec![SummaryRecord::new("A", f64::INFINITY, 0)]);
    }

    #[test]
    fn empty_rows_give_empty_summary() {
        let summary = aggregate(&[]).unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn frame_carries_sheet_label() {
        let df = rows_to_dataframe(&[row("A", Some(1.0), Some(2.0))]).unwrap();
        assert_eq!(df.get_column_names(), vec![KASIR, SELISIH, STRUK, SHEET]);
        assert_eq!(df.height(), 1);
    }
}
