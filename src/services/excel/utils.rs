use calamine::Data;

/// Empty cells, empty strings and error values (`#N/A`, `#DIV/0!`, ...) carry no value.
pub fn is_missing(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.is_empty(),
        Data::Float(f) => f.is_nan(),
        _ => false,
    }
}

/// Grouping key for a KASIR cell. Numeric ids render without a trailing `.0`.
///
/// The key is text only, so a numeric `101` and a text `"101"` land in the
/// same group.
pub fn cell_key(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Lenient numeric conversion: anything that does not read as a number is `None`.
pub fn to_numeric(cell: &Data) -> Option<f64> {
    let value = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Data::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn missing_cells() {
        assert!(is_missing(&Data::Empty));
        assert!(is_missing(&Data::String(String::new())));
        assert!(is_missing(&Data::Error(CellErrorType::NA)));
        assert!(!is_missing(&Data::String("N/A".to_string())));
        assert!(!is_missing(&Data::String(" ".to_string())));
        assert!(!is_missing(&Data::Float(0.0)));
    }

    #[test]
    fn numeric_keys_drop_trailing_zero() {
        assert_eq!(cell_key(&Data::Float(101.0)), "101");
        assert_eq!(cell_key(&Data::Int(7)), "7");
        assert_eq!(cell_key(&Data::String("ANI".to_string())), "ANI");
        assert_eq!(cell_key(&Data::Float(101.0)), cell_key(&Data::String("101".to_string())));
    }

    #[test]
    fn coerces_numbers_and_numeric_text() {
        assert_eq!(to_numeric(&Data::Float(-5.5)), Some(-5.5));
        assert_eq!(to_numeric(&Data::Int(20)), Some(20.0));
        assert_eq!(to_numeric(&Data::Bool(true)), Some(1.0));
        assert_eq!(to_numeric(&Data::String(" -12.5 ".to_string())), Some(-12.5));
        assert_eq!(to_numeric(&Data::String("1e3".to_string())), Some(1000.0));
        assert_eq!(to_numeric(&Data::String("inf".to_string())), Some(f64::INFINITY));
        assert_eq!(to_numeric(&Data::String("-Infinity".to_string())), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn unparseable_values_become_missing() {
        assert_eq!(to_numeric(&Data::String("N/A".to_string())), None);
        assert_eq!(to_numeric(&Data::String("1,000".to_string())), None);
        assert_eq!(to_numeric(&Data::String("nan".to_string())), None);
        assert_eq!(to_numeric(&Data::Error(CellErrorType::Div0)), None);
        assert_eq!(to_numeric(&Data::Empty), None);
    }
}
