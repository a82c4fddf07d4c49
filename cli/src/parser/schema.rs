//! Typed views of the IBGE aggregates API (`/api/v3/agregados`) payload.
//!
//! The root is an array of variable blocks, each holding `resultados`. Every
//! entry of `resultados` comes in one of two shapes:
//!
//! ```text
//! nested: { "classificacoes": [..], "series": [ { "localidade": {..}, "serie": { "202001": "0.21" } } ] }
//! flat:   { "localidade": {..}, "series": [ { "202001": "0.21" } ] }
//! ```

use crate::models::{Observation, RawValue};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Nested,
    Flat,
    Unknown,
}

impl ResponseShape {
    pub fn detect(entry: &Value) -> Self {
        if entry.get("localidade").is_some() {
            return ResponseShape::Flat;
        }
        match entry.get("series").and_then(Value::as_array) {
            Some(series) if series.is_empty() => ResponseShape::Nested,
            Some(series) if series[0].get("localidade").is_some() => ResponseShape::Nested,
            _ => ResponseShape::Unknown,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariableBlock {
    #[serde(default)]
    pub variavel: Option<String>,
    #[serde(default)]
    pub resultados: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Localidade {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub nome: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NestedSeries {
    pub localidade: Localidade,
    #[serde(default)]
    pub serie: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NestedResult {
    #[serde(default)]
    pub series: Vec<NestedSeries>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlatResult {
    pub localidade: Localidade,
    #[serde(default)]
    pub series: Vec<BTreeMap<String, Value>>,
}

/// A result entry that knows how to flatten itself into observations
pub trait SeriesShape: DeserializeOwned {
    fn into_observations(self) -> Vec<Observation>;
}

impl SeriesShape for NestedResult {
    fn into_observations(self) -> Vec<Observation> {
        self.series
            .into_iter()
            .flat_map(|s| collect_cells(&s.localidade, s.serie))
            .collect()
    }
}

impl SeriesShape for FlatResult {
    fn into_observations(self) -> Vec<Observation> {
        let localidade = self.localidade;
        self.series
            .into_iter()
            .flat_map(|cells| collect_cells(&localidade, cells))
            .collect()
    }
}

fn collect_cells(localidade: &Localidade, cells: BTreeMap<String, Value>) -> Vec<Observation> {
    cells
        .into_iter()
        .filter_map(|(period, raw)| {
            let value = RawValue::coerce(&raw).as_number()?;
            Some(Observation {
                period,
                region_id: localidade.id.clone(),
                region_name: localidade.nome.clone(),
                value,
            })
        })
        .collect()
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("expected string or number id, got {}", other))),
    }
}
