use calamine::Data;
use serde::{Deserialize, Serialize, Serializer};

pub const KASIR: &str = "KASIR";
pub const SELISIH: &str = "SELISIH";
pub const STRUK: &str = "STRUK";
pub const SHEET: &str = "Sheet";
pub const TOTAL_STRUK: &str = "total_struk";
pub const NEGATIVE_SELISIH_COUNT: &str = "negative_selisih_count";

/// A data row as selected from a sheet, before numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub kasir: String,
    pub selisih: Data,
    pub struk: Data,
    pub sheet: String,
}

/// A data row after SELISIH and STRUK have been coerced to numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    pub kasir: String,
    pub selisih: Option<f64>,
    pub struk: Option<f64>,
    pub sheet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(rename = "KASIR")]
    pub kasir: String,
    #[serde(serialize_with = "serialize_total")]
    pub total_struk: f64,
    pub negative_selisih_count: u64,
}

/// Display form shared by the HTML table and the CSV file: `150.0`, `inf`, `NaN`.
pub fn format_total(value: f64) -> String {
    format!("{:?}", value)
}

// JSON has no infinity or NaN; those go out as strings matching the CSV.
fn serialize_total<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_str(&format_total(*value))
    }
}

impl SummaryRecord {
    pub fn new(kasir: impl Into<String>, total_struk: f64, negative_selisih_count: u64) -> Self {
        Self {
            kasir: kasir.into(),
            total_struk,
            negative_selisih_count,
        }
    }
}

/// One row per distinct KASIR, ordered by KASIR.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Summary {
    pub rows: Vec<SummaryRecord>,
}

impl Summary {
    pub fn new(rows: Vec<SummaryRecord>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The summary plus the counts the upload endpoints report back.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub sheet_count: usize,
    pub row_count: usize,
    pub summary: Summary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn totals_format_with_decimal_point() {
        assert_eq!(format_total(150.0), "150.0");
        assert_eq!(format_total(-12.25), "-12.25");
        assert_eq!(format_total(f64::INFINITY), "inf");
    }

    #[test]
    fn non_finite_totals_serialize_as_strings() {
        let summary = Summary::new(vec![
            SummaryRecord::new("A", f64::INFINITY, 0),
            SummaryRecord::new("B", 20.0, 1),
        ]);
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!([
                {"KASIR": "A", "total_struk": "inf", "negative_selisih_count": 0},
                {"KASIR": "B", "total_struk": 20.0, "negative_selisih_count": 1}
            ])
        );
    }
}
