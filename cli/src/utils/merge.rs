use crate::models::{AggregatedRecord, JoinedRecord, MacroRegion, QuarterKey, UnemploymentRecord};
use std::collections::HashMap;

/// Inner join on (region, quarter).
///
/// Keys present in only one side are dropped; nothing is filled or
/// interpolated. The output is sorted by (region, quarter), so it does not
/// depend on the order of either input.
pub fn inner_join(
    unemployment: &[UnemploymentRecord],
    inflation: &[AggregatedRecord],
) -> Vec<JoinedRecord> {
    let by_key: HashMap<(MacroRegion, QuarterKey), &AggregatedRecord> = inflation
        .iter()
        .map(|record| ((record.region, record.quarter), record))
        .collect();

    let mut joined: Vec<JoinedRecord> = unemployment
        .iter()
        .filter_map(|u| {
            let inflation = by_key.get(&(u.region, u.quarter))?;
            Some(JoinedRecord {
                region: u.region,
                quarter: u.quarter,
                unemployment: u.rate,
                inflation: inflation.scaled,
                date: u.quarter.start_date()?,
            })
        })
        .collect();

    joined.sort_by(|a, b| a.key().cmp(&b.key()));
    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn q(year: i32, quarter: u8) -> QuarterKey {
        QuarterKey::new(year, quarter).unwrap()
    }

    fn unemployment(region: MacroRegion, quarter: QuarterKey, rate: f64) -> UnemploymentRecord {
        UnemploymentRecord { region, quarter, rate }
    }

    fn inflation(region: MacroRegion, quarter: QuarterKey, mean: f64) -> AggregatedRecord {
        AggregatedRecord { region, quarter, mean, scaled: mean * 3.0 }
    }

    #[test]
    fn test_inner_join_keeps_common_keys() {
        let u = vec![
            unemployment(MacroRegion::Sul, q(2020, 1), 7.0),
            unemployment(MacroRegion::Sul, q(2020, 2), 8.0),
            unemployment(MacroRegion::Norte, q(2020, 1), 12.0),
        ];
        let i = vec![
            inflation(MacroRegion::Sul, q(2020, 1), 0.2),
            inflation(MacroRegion::Norte, q(2020, 1), 0.3),
            inflation(MacroRegion::Norte, q(2020, 3), 0.1),
        ];

        let joined = inner_join(&u, &i);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].region, MacroRegion::Norte);
        assert_eq!(joined[0].region_name(), "Norte");
        assert!((joined[0].inflation - 0.9).abs() < 1e-12);
        assert_eq!(joined[1].region, MacroRegion::Sul);
        assert_eq!(joined[1].date.to_string(), "2020-01-01");
    }

    #[test]
    fn test_join_is_independent_of_input_order() {
        let mut u = vec![
            unemployment(MacroRegion::Sudeste, q(2021, 1), 14.0),
            unemployment(MacroRegion::Sudeste, q(2021, 2), 13.5),
            unemployment(MacroRegion::Nordeste, q(2021, 1), 18.0),
            unemployment(MacroRegion::CentroOeste, q(2021, 2), 10.0),
        ];
        let mut i = vec![
            inflation(MacroRegion::Sudeste, q(2021, 2), 0.5),
            inflation(MacroRegion::Nordeste, q(2021, 1), 0.4),
            inflation(MacroRegion::CentroOeste, q(2021, 2), 0.6),
            inflation(MacroRegion::Sudeste, q(2021, 1), 0.3),
        ];

        let forward = inner_join(&u, &i);
        u.reverse();
        i.rotate_left(2);
        let shuffled = inner_join(&u, &i);

        let keys = |rows: &[JoinedRecord]| rows.iter().map(|r| r.key()).collect::<BTreeSet<_>>();
        assert_eq!(keys(&forward), keys(&shuffled));
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_disjoint_quarters_yield_empty_join() {
        let u = vec![unemployment(MacroRegion::Sul, q(2020, 1), 7.0)];
        let i = vec![inflation(MacroRegion::Sul, q(2020, 2), 0.2)];
        assert!(inner_join(&u, &i).is_empty());
    }
}
