//! # Leaderboards
//!
//! Pure aggregations over the result table.
//!
//! | Board | Rows | Grouped by | Ranked by |
//! |-------|------|------------|-----------|
//! | puppeteer | `Puppeteer` | `qb_name` | total clv |
//! | gravity | `Gravity` | `decoy_name` | total EPA |
//! | victim | all | `(player_name, player_position)` | total clv |
//!
//! Each entry also carries its best rep: the highest-clv play of the group.

use crate::models::{LeakCause, PlayKey, PlayMetricsResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuppeteerEntry {
    pub qb_name: String,
    pub total_clv: f64,
    pub mean_clv: f64,
    pub plays: usize,
    pub mean_epa: Option<f64>,
    pub best_play: PlayKey,
    pub best_pass_result: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GravityEntry {
    pub decoy_name: String,
    pub total_epa: f64,
    pub mean_clv: f64,
    pub plays: usize,
    pub best_play: PlayKey,
    pub best_pass_result: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VictimEntry {
    pub player_name: String,
    pub player_position: Option<String>,
    pub total_clv: f64,
    pub plays: usize,
    /// 0..100, higher = less efficient pursuit after the throw
    pub panic_score: f64,
    pub worst_play: PlayKey,
    pub worst_pass_result: Option<String>,
}

/// Rows grouped under a key, in key order.
fn group_by<'a, K, F>(
    rows: impl Iterator<Item = &'a PlayMetricsResult>,
    key: F,
) -> BTreeMap<K, Vec<&'a PlayMetricsResult>>
where
    K: Ord,
    F: Fn(&PlayMetricsResult) -> Option<K>,
{
    let mut groups: BTreeMap<K, Vec<&PlayMetricsResult>> = BTreeMap::new();
    for row in rows {
        if let Some(k) = key(row) {
            groups.entry(k).or_default().push(row);
        }
    }
    groups
}

/// Highest-clv row; ties keep the earliest play.
fn best_rep<'a>(rows: &[&'a PlayMetricsResult]) -> Option<&'a PlayMetricsResult> {
    rows.iter()
        .copied()
        .reduce(|best, r| if r.clv > best.clv { r } else { best })
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

fn sort_desc<T>(entries: &mut [T], by: impl Fn(&T) -> f64) {
    entries.sort_by(|a, b| by(b).total_cmp(&by(a)));
}

/// `clamp(((1 - mean efficiency) / 2) * 100, 0, 100)`; 0 when no efficiency is defined.
pub fn panic_score(efficiencies: impl Iterator<Item = f64>) -> f64 {
    mean(efficiencies)
        .map(|m| ((1.0 - m) / 2.0 * 100.0).clamp(0.0, 100.0))
        .unwrap_or(0.0)
}

/// Quarterbacks whose eyes moved the Victim.
pub fn puppeteer_board(results: &[PlayMetricsResult], min_plays: usize) -> Vec<PuppeteerEntry> {
    let groups = group_by(
        results.iter().filter(|r| r.leak_cause == LeakCause::Puppeteer),
        |r| r.qb_name.clone(),
    );
    let mut board: Vec<PuppeteerEntry> = groups
        .into_iter()
        .filter(|(_, rows)| rows.len() >= min_plays)
        .filter_map(|(qb_name, rows)| {
            let total_clv: f64 = rows.iter().map(|r| r.clv).sum();
            let best = best_rep(&rows)?;
            Some(PuppeteerEntry {
                qb_name,
                total_clv,
                mean_clv: total_clv / rows.len() as f64,
                plays: rows.len(),
                mean_epa: mean(rows.iter().filter_map(|r| r.epa)),
                best_play: PlayKey::new(best.game_id, best.play_id),
                best_pass_result: best.pass_result.clone(),
            })
        })
        .collect();
    sort_desc(&mut board, |e| e.total_clv);
    board
}

/// Decoys whose routes pulled the Victim.
pub fn gravity_board(results: &[PlayMetricsResult], min_plays: usize) -> Vec<GravityEntry> {
    let groups = group_by(
        results.iter().filter(|r| r.leak_cause == LeakCause::Gravity),
        |r| r.decoy_name.clone(),
    );
    let mut board: Vec<GravityEntry> = groups
        .into_iter()
        .filter(|(_, rows)| rows.len() >= min_plays)
        .filter_map(|(decoy_name, rows)| {
            let best = best_rep(&rows)?;
            Some(GravityEntry {
                decoy_name,
                total_epa: rows.iter().filter_map(|r| r.epa).sum(),
                mean_clv: rows.iter().map(|r| r.clv).sum::<f64>() / rows.len() as f64,
                plays: rows.len(),
                best_play: PlayKey::new(best.game_id, best.play_id),
                best_pass_result: best.pass_result.clone(),
            })
        })
        .collect();
    sort_desc(&mut board, |e| e.total_epa);
    board
}

/// Defenders ranked by void allowed.
pub fn victim_board(results: &[PlayMetricsResult], min_plays: usize) -> Vec<VictimEntry> {
    let groups = group_by(results.iter(), |r| {
        r.player_name
            .clone()
            .map(|name| (name, r.player_position.clone()))
    });
    let mut board: Vec<VictimEntry> = groups
        .into_iter()
        .filter(|(_, rows)| rows.len() >= min_plays)
        .filter_map(|((player_name, player_position), rows)| {
            let worst = best_rep(&rows)?;
            Some(VictimEntry {
                player_name,
                player_position,
                total_clv: rows.iter().map(|r| r.clv).sum(),
                plays: rows.len(),
                panic_score: panic_score(rows.iter().filter_map(|r| r.bia_efficiency)),
                worst_play: PlayKey::new(worst.game_id, worst.play_id),
                worst_pass_result: worst.pass_result.clone(),
            })
        })
        .collect();
    sort_desc(&mut board, |e| e.total_clv);
    board
}
