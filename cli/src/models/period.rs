use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

// Both IBGE period codes are six digits: YYYYMM for monthly tables and
// YYYY0Q for quarterly ones.
fn period_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})(\d{2})$").expect("valid period regex"))
}

fn split_period_code(code: &str) -> Option<(i32, u32)> {
    let caps = period_code_regex().captures(code.trim())?;
    let year = caps[1].parse().ok()?;
    let suffix = caps[2].parse().ok()?;
    Some((year, suffix))
}

/// Calendar month parsed from a `YYYYMM` period code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn parse(code: &str) -> Option<Self> {
        let (year, month) = split_period_code(code)?;
        Self::new(year, month)
    }

    /// Calendar quarter containing this month
    pub fn quarter(&self) -> QuarterKey {
        QuarterKey {
            year: self.year,
            quarter: ((self.month - 1) / 3 + 1) as u8,
        }
    }
}

/// Calendar quarter, ordered by year then quarter number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuarterKey {
    pub year: i32,
    pub quarter: u8,
}

impl QuarterKey {
    pub fn new(year: i32, quarter: u8) -> Option<Self> {
        (1..=4).contains(&quarter).then_some(Self { year, quarter })
    }

    /// Parse a quarterly period code such as "202301" (2023, Q1)
    pub fn parse(code: &str) -> Option<Self> {
        let (year, quarter) = split_period_code(code)?;
        Self::new(year, u8::try_from(quarter).ok()?)
    }

    /// Sortable composite key in the IBGE quarterly format (`YYYY0Q`)
    pub fn code(&self) -> String {
        format!("{:04}0{}", self.year, self.quarter)
    }

    /// First day of the quarter
    pub fn start_date(&self) -> Option<NaiveDate> {
        let month = u32::from(self.quarter - 1) * 3 + 1;
        NaiveDate::from_ymd_opt(self.year, month, 1)
    }
}

impl fmt::Display for QuarterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Q{}", self.year, self.quarter)
    }
}
