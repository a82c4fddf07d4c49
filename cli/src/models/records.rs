use crate::models::{MacroRegion, QuarterKey};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Monthly inflation reading mapped onto the macro-region taxonomy
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyInflation {
    pub region: MacroRegion,
    pub quarter: QuarterKey,
    pub rate: f64,
}

/// Quarterly inflation for one (region, quarter) group
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRecord {
    pub region: MacroRegion,
    pub quarter: QuarterKey,
    /// Arithmetic mean of the monthly rates in the group
    pub mean: f64,
    /// `mean * 3`, the approximate accumulated rate for the quarter
    pub scaled: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnemploymentRecord {
    pub region: MacroRegion,
    pub quarter: QuarterKey,
    pub rate: f64,
}

/// One (region, quarter) row present in both series
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    pub region: MacroRegion,
    pub quarter: QuarterKey,
    pub unemployment: f64,
    pub inflation: f64,
    pub date: NaiveDate,
}

impl JoinedRecord {
    pub fn region_name(&self) -> &'static str {
        self.region.name()
    }

    pub fn key(&self) -> (MacroRegion, QuarterKey) {
        (self.region, self.quarter)
    }
}

/// Flat row used for CSV export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinedRow {
    pub region_code: String,
    pub region: String,
    pub quarter: String,
    pub date: String,
    pub unemployment_rate: f64,
    pub inflation_quarterly: f64,
}

impl From<&JoinedRecord> for JoinedRow {
    fn from(record: &JoinedRecord) -> Self {
        Self {
            region_code: record.region.code().to_string(),
            region: record.region_name().to_string(),
            quarter: record.quarter.code(),
            date: record.date.format("%Y-%m-%d").to_string(),
            unemployment_rate: record.unemployment,
            inflation_quarterly: record.inflation,
        }
    }
}

/// Final aligned dataset. An empty dataset is the single "no data" outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<JoinedRecord>,
}

impl Dataset {
    pub fn new(mut records: Vec<JoinedRecord>) -> Self {
        records.sort_by_key(|r| r.key());
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[JoinedRecord] {
        &self.records
    }

    /// Records of one region, in quarter order
    pub fn for_region(&self, region: MacroRegion) -> impl Iterator<Item = &JoinedRecord> {
        self.records.iter().filter(move |r| r.region == region)
    }

    /// Regions that have at least one row, in code order
    pub fn regions(&self) -> Vec<MacroRegion> {
        let mut regions: Vec<MacroRegion> = self.records.iter().map(|r| r.region).collect();
        regions.dedup();
        regions
    }

    pub fn inflation_values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.inflation).collect()
    }

    pub fn unemployment_values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.unemployment).collect()
    }

    pub fn rows(&self) -> Vec<JoinedRow> {
        self.records.iter().map(JoinedRow::from).collect()
    }
}
