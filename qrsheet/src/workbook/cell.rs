//! Cell values as they leave the workbook

use calamine::Data;
use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;

/// A single cell, normalized for JSON output
///
/// Absent data is always `Text("")`, never a null.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// The empty-string sentinel used for missing cells
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }

    /// Text rendering used for header names and grouping keys
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => if *b { "True" } else { "False" }.to_string(),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::empty()
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::empty(),
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => {
                // Whole numbers come back from xlsx as floats
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    CellValue::Int(*f as i64)
                } else {
                    CellValue::Float(*f)
                }
            }
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(value) => CellValue::Text(format_datetime(value)),
                None => CellValue::Float(dt.as_f64()),
            },
            Data::DateTimeIso(s) => CellValue::Text(s.clone()),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(_) => CellValue::empty(),
        }
    }
}

fn format_datetime(value: NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    #[test]
    fn test_empty_and_error_cells_become_sentinel() {
        assert_eq!(CellValue::from(&Data::Empty), CellValue::empty());
        assert!(CellValue::from(&Data::Empty).is_empty());
        assert_eq!(
            CellValue::from(&Data::Error(calamine::CellErrorType::NA)),
            CellValue::empty()
        );
    }

    #[test]
    fn test_whole_floats_become_integers() {
        assert_eq!(CellValue::from(&Data::Float(85.0)), CellValue::Int(85));
        assert_eq!(CellValue::from(&Data::Float(0.5)), CellValue::Float(0.5));
        assert_eq!(CellValue::from(&Data::Int(-3)), CellValue::Int(-3));
    }

    #[test]
    fn test_text_rendering() {
        assert_eq!(CellValue::Int(3).as_text(), "3");
        assert_eq!(CellValue::Float(1.5).as_text(), "1.5");
        assert_eq!(CellValue::Bool(true).as_text(), "True");
        assert_eq!(CellValue::Text(" Thermal ".into()).as_text(), " Thermal ");
    }

    fn date_cell(serial: f64, is_1904: bool) -> CellValue {
        CellValue::from(&Data::DateTime(ExcelDateTime::new(
            serial,
            ExcelDateTimeType::DateTime,
            is_1904,
        )))
    }

    #[test]
    fn test_serial_dates() {
        assert_eq!(date_cell(45292.0, false), CellValue::Text("2024-01-01".into()));
        assert_eq!(
            date_cell(45292.5, false),
            CellValue::Text("2024-01-01T12:00:00".into())
        );
    }

    #[test]
    fn test_serial_dates_before_fictional_leap_day() {
        assert_eq!(date_cell(1.0, false), CellValue::Text("1900-01-01".into()));
        assert_eq!(date_cell(61.0, false), CellValue::Text("1900-03-01".into()));
    }

    #[test]
    fn test_serial_dates_1904_system() {
        assert_eq!(date_cell(1.0, true), CellValue::Text("1904-01-02".into()));
        assert_eq!(date_cell(43830.0, true), CellValue::Text("2024-01-01".into()));
    }

    #[test]
    fn test_serializes_untagged() {
        let values = vec![
            CellValue::Text("85C".into()),
            CellValue::Int(2),
            CellValue::Float(0.25),
            CellValue::Bool(false),
            CellValue::empty(),
        ];
        assert_eq!(
            serde_json::to_string(&values).unwrap(),
            r#"["85C",2,0.25,false,""]"#
        );
    }
}
