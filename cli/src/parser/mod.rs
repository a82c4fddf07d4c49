pub mod schema;

use crate::error::ParseError;
use crate::models::Observation;
use schema::{FlatResult, NestedResult, ResponseShape, SeriesShape, VariableBlock};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Flatten an IBGE aggregates response into numeric observations.
///
/// Sentinel and non-numeric cells are dropped without error; entries whose
/// shape is not recognized are skipped. Only a root that is not an array of
/// variable blocks is an error.
pub fn parse_series(root: &Value) -> Result<Vec<Observation>, ParseError> {
    let blocks = root
        .as_array()
        .ok_or_else(|| ParseError::UnexpectedRoot(describe(root)))?;

    let mut observations = Vec::new();
    for block in blocks {
        let block = match VariableBlock::deserialize(block) {
            Ok(block) => block,
            Err(e) => {
                debug!(error = %e, "Skipping malformed variable block");
                continue;
            }
        };

        for entry in &block.resultados {
            let shape = ResponseShape::detect(entry);
            let parsed = match shape {
                ResponseShape::Nested => decode::<NestedResult>(entry),
                ResponseShape::Flat => decode::<FlatResult>(entry),
                ResponseShape::Unknown => None,
            };
            match parsed {
                Some(mut found) => observations.append(&mut found),
                None => debug!(?shape, variable = ?block.variavel, "Skipping unrecognized result entry"),
            }
        }
    }

    debug!(count = observations.len(), "Parsed observations");
    Ok(observations)
}

fn decode<S: SeriesShape>(entry: &Value) -> Option<Vec<Observation>> {
    S::deserialize(entry).ok().map(SeriesShape::into_observations)
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(_) => "array".to_string(),
        Value::Object(map) => format!("object with keys {:?}", map.keys().collect::<Vec<_>>()),
    }
}
