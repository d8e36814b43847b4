//! # Closing Efficiency Over Expectation
//!
//! Table-level benchmark: each row's ball-flight closing speed minus the
//! mean closing speed of its `(player_position, void_type)` group.

use crate::models::{PlayMetricsResult, VoidType};
use rustc_hash::FxHashMap;

/// Peer group a closing speed is benchmarked against.
pub type CeoeGroupKey = (Option<String>, Option<VoidType>);

fn group_key(row: &PlayMetricsResult) -> CeoeGroupKey {
    (row.player_position.clone(), row.void_type)
}

/// Fill `ceoe_score` for every row with a defined closing speed.
///
/// Rows without one keep `ceoe_score = None`. Returns the group means.
pub fn apply_ceoe(results: &mut [PlayMetricsResult]) -> FxHashMap<CeoeGroupKey, f64> {
    let mut sums: FxHashMap<CeoeGroupKey, (f64, usize)> = FxHashMap::default();
    for row in results.iter() {
        if let Some(cs) = row.closing_speed {
            let e = sums.entry(group_key(row)).or_insert((0.0, 0));
            e.0 += cs;
            e.1 += 1;
        }
    }
    let means: FxHashMap<CeoeGroupKey, f64> = sums
        .into_iter()
        .map(|(k, (sum, n))| (k, sum / n as f64))
        .collect();

    for row in results.iter_mut() {
        row.ceoe_score = match row.closing_speed {
            Some(cs) => means.get(&group_key(row)).map(|mean| cs - mean),
            None => None,
        };
    }
    means
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{LeakCause, PlayMetricsResult};

    pub fn result(play_id: i64) -> PlayMetricsResult {
        PlayMetricsResult {
            game_id: 1,
            play_id,
            nfl_id: 10,
            player_name: Some("Victim".to_string()),
            player_position: Some("CB".to_string()),
            qb_name: Some("Passer".to_string()),
            qb_nfl_id: 1,
            target_name: None,
            target_nfl_id: None,
            clv: 0.0,
            leak_cause: LeakCause::UnforcedError,
            decoy_name: None,
            decoy_nfl_id: None,
            bia_efficiency: None,
            reaction_delay: None,
            recovery_tax: None,
            closing_speed: None,
            void_type: None,
            separation_at_throw: None,
            ceoe_score: None,
            epa: None,
            pass_result: Some("C".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::result;
    use super::*;

    #[test]
    fn test_ceoe_relative_to_group() {
        let mut rows = vec![result(1), result(2), result(3), result(4)];
        rows[0].closing_speed = Some(6.0);
        rows[1].closing_speed = Some(4.0);
        rows[2].closing_speed = Some(3.0);
        rows[2].player_position = Some("SS".to_string());
        // row 3 has no closing speed

        let means = apply_ceoe(&mut rows);

        assert!((rows[0].ceoe_score.unwrap() - 1.0).abs() < 1e-9);
        assert!((rows[1].ceoe_score.unwrap() + 1.0).abs() < 1e-9);
        assert!(rows[2].ceoe_score.unwrap().abs() < 1e-9);
        assert_eq!(rows[3].ceoe_score, None);
        assert_eq!(means.len(), 2);
    }

    #[test]
    fn test_void_type_splits_groups() {
        let mut rows = vec![result(1), result(2)];
        rows[0].closing_speed = Some(6.0);
        rows[0].void_type = Some(VoidType::HighVoid);
        rows[1].closing_speed = Some(2.0);
        rows[1].void_type = Some(VoidType::TightWindow);

        apply_ceoe(&mut rows);
        assert!(rows[0].ceoe_score.unwrap().abs() < 1e-9);
        assert!(rows[1].ceoe_score.unwrap().abs() < 1e-9);
    }
}
