use crate::models::{AggregatedRecord, MacroRegion, MonthlyInflation, QuarterKey};
use std::collections::BTreeMap;

/// Factor turning a mean monthly rate into an approximate quarterly
/// accumulated rate. Simple sum of three months, not compounding.
pub const QUARTERLY_SCALE: f64 = 3.0;

/// Average monthly readings per (region, quarter).
///
/// Yields exactly one record per distinct pair in the input, ordered by
/// region then quarter.
pub fn aggregate_quarterly(monthly: &[MonthlyInflation]) -> Vec<AggregatedRecord> {
    let mut groups: BTreeMap<(MacroRegion, QuarterKey), (f64, usize)> = BTreeMap::new();
    for reading in monthly {
        let entry = groups.entry((reading.region, reading.quarter)).or_insert((0.0, 0));
        entry.0 += reading.rate;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((region, quarter), (sum, count))| {
            let mean = sum / count as f64;
            AggregatedRecord {
                region,
                quarter,
                mean,
                scaled: mean * QUARTERLY_SCALE,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(region: MacroRegion, year: i32, quarter: u8, rate: f64) -> MonthlyInflation {
        MonthlyInflation {
            region,
            quarter: QuarterKey::new(year, quarter).unwrap(),
            rate,
        }
    }

    #[test]
    fn test_quarterly_mean_and_scale() {
        let monthly = vec![
            reading(MacroRegion::Sudeste, 2022, 1, 1.0),
            reading(MacroRegion::Sudeste, 2022, 1, 0.5),
            reading(MacroRegion::Sudeste, 2022, 1, 1.5),
        ];
        let aggregated = aggregate_quarterly(&monthly);
        assert_eq!(aggregated.len(), 1);
        assert!((aggregated[0].mean - 1.0).abs() < 1e-12);
        assert!((aggregated[0].scaled - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_one_record_per_group() {
        let monthly = vec![
            reading(MacroRegion::Sul, 2021, 2, 0.3),
            reading(MacroRegion::Norte, 2021, 2, 0.6),
            reading(MacroRegion::Sul, 2021, 2, 0.5),
            reading(MacroRegion::Sul, 2021, 3, 0.2),
            // Two metro areas of the same region in the same month both count
            reading(MacroRegion::Norte, 2021, 2, 0.2),
        ];
        let aggregated = aggregate_quarterly(&monthly);
        assert_eq!(aggregated.len(), 3);

        assert_eq!(aggregated[0].region, MacroRegion::Norte);
        assert!((aggregated[0].mean - 0.4).abs() < 1e-12);
        assert_eq!(aggregated[1].region, MacroRegion::Sul);
        assert_eq!(aggregated[1].quarter.quarter, 2);
        assert!((aggregated[1].mean - 0.4).abs() < 1e-12);
        assert_eq!(aggregated[2].quarter.quarter, 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_quarterly(&[]).is_empty());
    }
}
