use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Markers IBGE publishes in place of a number
pub const SENTINELS: [&str; 3] = ["...", "-", "X"];

/// Outcome of coercing one raw cell of an IBGE series
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue {
    Number(f64),
    Sentinel,
    Invalid,
}

impl RawValue {
    pub fn coerce(value: &Value) -> Self {
        match value {
            Value::Null => RawValue::Sentinel,
            Value::Number(n) => n
                .as_f64()
                .filter(|v| v.is_finite())
                .map_or(RawValue::Invalid, RawValue::Number),
            Value::String(s) => Self::coerce_str(s),
            _ => RawValue::Invalid,
        }
    }

    pub fn coerce_str(raw: &str) -> Self {
        let trimmed = raw.trim();
        if SENTINELS.contains(&trimmed) {
            return RawValue::Sentinel;
        }
        match trimmed.replace(',', ".").parse::<f64>() {
            Ok(v) if v.is_finite() => RawValue::Number(v),
            _ => RawValue::Invalid,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/// One usable numeric cell of a series, still in source taxonomy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub period: String,
    pub region_id: String,
    pub region_name: String,
    pub value: f64,
}
