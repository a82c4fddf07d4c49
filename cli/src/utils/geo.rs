use crate::models::{MacroRegion, MonthKey, MonthlyInflation, Observation, QuarterKey, UnemploymentRecord};
use tracing::debug;

/// Map metropolitan-area IPCA readings onto macro-regions and quarters.
///
/// Observations with an unknown leading digit or a malformed month code are
/// dropped.
pub fn map_monthly_inflation(observations: &[Observation]) -> Vec<MonthlyInflation> {
    let mapped: Vec<MonthlyInflation> = observations
        .iter()
        .filter_map(|obs| {
            let region = MacroRegion::from_region_id(&obs.region_id)?;
            let month = MonthKey::parse(&obs.period)?;
            Some(MonthlyInflation {
                region,
                quarter: month.quarter(),
                rate: obs.value,
            })
        })
        .collect();

    if mapped.len() < observations.len() {
        debug!(
            dropped = observations.len() - mapped.len(),
            "Dropped inflation observations with unknown region or month"
        );
    }
    mapped
}

/// Map macro-region PNAD readings; the region id is already the join key.
pub fn map_unemployment(observations: &[Observation]) -> Vec<UnemploymentRecord> {
    let mapped: Vec<UnemploymentRecord> = observations
        .iter()
        .filter_map(|obs| {
            Some(UnemploymentRecord {
                region: MacroRegion::from_code(&obs.region_id)?,
                quarter: QuarterKey::parse(&obs.period)?,
                rate: obs.value,
            })
        })
        .collect();

    if mapped.len() < observations.len() {
        debug!(
            dropped = observations.len() - mapped.len(),
            "Dropped unemployment observations with unknown region or quarter"
        );
    }
    mapped
}
