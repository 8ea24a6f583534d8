//! Procedure records and the in-memory table they are loaded into.

use adoption_common::{DeviceId, PhysicianId};
use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// A single procedure performed with the device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcedureRecord {
    pub physician_id: PhysicianId,
    pub device_id: DeviceId,
    pub procedure_date: NaiveDate,
    pub region: String,
    pub specialty: String,
    /// `None` when the source cell was blank
    pub revenue_impact: Option<f64>,
}

/// A calendar month, ordered chronologically and displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Creates a month, returning `None` if `month` is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The following calendar month.
    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Every month from `start` to `end`, both inclusive. Empty if `start > end`.
    pub fn range_inclusive(start: Self, end: Self) -> Vec<Self> {
        let mut months = Vec::new();
        let mut current = start;
        while current <= end {
            months.push(current);
            current = current.succ();
        }
        months
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Immutable table of procedure records, kept in file order.
#[derive(Debug, Clone, Default)]
pub struct ProcedureTable {
    records: Vec<ProcedureRecord>,
    dropped_rows: usize,
}

impl ProcedureTable {
    /// Wraps loaded records, remembering how many input rows were discarded.
    pub fn new(records: Vec<ProcedureRecord>, dropped_rows: usize) -> Self {
        Self {
            records,
            dropped_rows,
        }
    }

    /// Builds a table from records with no dropped rows.
    pub fn from_records(records: Vec<ProcedureRecord>) -> Self {
        Self::new(records, 0)
    }

    pub fn records(&self) -> &[ProcedureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows discarded at load because their procedure date did not parse.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Sorted, de-duplicated region names.
    pub fn regions(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.region.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Sorted, de-duplicated specialty names.
    pub fn specialties(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.specialty.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// First and last procedure month, or `None` for an empty table.
    pub fn month_span(&self) -> Option<(YearMonth, YearMonth)> {
        let first = self.records.iter().map(|r| r.procedure_date).min()?;
        let last = self.records.iter().map(|r| r.procedure_date).max()?;
        Some((YearMonth::from_date(first), YearMonth::from_date(last)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(physician: &str, date: (i32, u32, u32), region: &str, specialty: &str) -> ProcedureRecord {
        ProcedureRecord {
            physician_id: PhysicianId::from(physician),
            device_id: DeviceId::from("D-1"),
            procedure_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            region: region.to_string(),
            specialty: specialty.to_string(),
            revenue_impact: Some(100.0),
        }
    }

    #[test]
    fn test_year_month_validation_and_display() {
        assert!(YearMonth::new(2024, 0).is_none());
        assert!(YearMonth::new(2024, 13).is_none());
        assert_eq!(YearMonth::new(2024, 3).unwrap().to_string(), "2024-03");
    }

    #[test]
    fn test_year_month_succ_rolls_over_year() {
        let december = YearMonth::new(2023, 12).unwrap();
        assert_eq!(december.succ(), YearMonth::new(2024, 1).unwrap());
    }

    #[test]
    fn test_range_inclusive() {
        let start = YearMonth::new(2023, 11).unwrap();
        let end = YearMonth::new(2024, 2).unwrap();
        let months: Vec<String> = YearMonth::range_inclusive(start, end)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(months, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);

        assert!(YearMonth::range_inclusive(end, start).is_empty());
    }

    #[test]
    fn test_year_month_serializes_as_string() {
        let json = serde_json::to_string(&YearMonth::new(2024, 1).unwrap()).unwrap();
        assert_eq!(json, "\"2024-01\"");
    }

    #[test]
    fn test_table_distinct_categories_are_sorted() {
        let table = ProcedureTable::from_records(vec![
            record("1", (2024, 1, 5), "West", "Ortho"),
            record("2", (2024, 1, 6), "East", "Cardiology"),
            record("3", (2024, 1, 7), "West", "Cardiology"),
        ]);

        assert_eq!(table.regions(), vec!["East", "West"]);
        assert_eq!(table.specialties(), vec!["Cardiology", "Ortho"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.dropped_rows(), 0);
    }

    #[test]
    fn test_month_span() {
        let table = ProcedureTable::from_records(vec![
            record("1", (2024, 3, 5), "West", "Ortho"),
            record("2", (2023, 12, 31), "East", "Ortho"),
        ]);
        let (first, last) = table.month_span().unwrap();
        assert_eq!(first.to_string(), "2023-12");
        assert_eq!(last.to_string(), "2024-03");

        assert!(ProcedureTable::default().month_span().is_none());
    }
}
