//! Batch run over a range of weeks.
//!
//! Per week: load -> filter -> stitch -> normalize -> recover -> analyze.
//! A week whose input is absent or unparsable is skipped; the run fails
//! only on output errors or an unreadable supplementary table.

use crate::export::{
    write_leaderboards, write_metrics, FrameWriter, Leaderboards, FRAMES_FILE, LEADERBOARDS_FILE,
    METRICS_FILE,
};
use crate::loader::{load_supplementary, load_week, SUPPLEMENTARY_FILE};
use anyhow::{bail, Context, Result};
use clv_core::analysis::apply_ceoe;
use clv_core::etl::SupplementaryFilter;
use clv_core::models::Play;
use clv_core::{prepare_week, AnalysisConfig, RunReport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const SUMMARY_FILE: &str = "run_summary.json";
pub const DEFAULT_MIN_PLAYS: usize = 5;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub data_dir: PathBuf,
    pub weeks: Vec<u32>,
    pub out_dir: PathBuf,
    /// Defaults to `<data_dir>/supplementary_data.csv`
    pub supplementary: Option<PathBuf>,
    pub config: AnalysisConfig,
    /// Minimum plays for a leaderboard entry
    pub min_plays: usize,
}

impl PipelineOptions {
    pub fn supplementary_path(&self) -> PathBuf {
        self.supplementary
            .clone()
            .unwrap_or_else(|| self.data_dir.join(SUPPLEMENTARY_FILE))
    }
}

/// Per-week counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub week: u32,
    pub plays: usize,
    pub analyzed: usize,
    pub excluded: usize,
    pub dropped: usize,
    pub filtered_out: usize,
    pub stitch_anomalies: usize,
}

/// What a run produced. Saved next to the exports as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// RFC3339
    pub created_at: String,
    pub weeks: Vec<WeekSummary>,
    pub weeks_skipped: Vec<u32>,
    pub frame_rows: usize,
    pub plays_seen: usize,
    pub plays_analyzed: usize,
    pub exclusions: BTreeMap<String, usize>,
    pub frames_path: PathBuf,
    pub metrics_path: PathBuf,
    pub leaderboards_path: PathBuf,
}

/// Parse `"1-9"`, `"3"` or `"1,3,5-7"` into a sorted, de-duplicated week list.
pub fn parse_week_range(spec: &str) -> Result<Vec<u32>> {
    let mut weeks = Vec::new();
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((a, b)) => {
                let start: u32 = a.trim().parse().with_context(|| format!("Invalid week: {}", a))?;
                let end: u32 = b.trim().parse().with_context(|| format!("Invalid week: {}", b))?;
                if start > end {
                    bail!("Invalid week range: {}", part);
                }
                weeks.extend(start..=end);
            }
            None => weeks.push(part.parse().with_context(|| format!("Invalid week: {}", part))?),
        }
    }
    if weeks.is_empty() {
        bail!("No weeks selected: '{}'", spec);
    }
    weeks.sort_unstable();
    weeks.dedup();
    Ok(weeks)
}

/// One analyzed week, not yet exported.
struct WeekOutput {
    summary: WeekSummary,
    plays: Vec<Play>,
    report: RunReport,
}

fn analyze_week(
    data_dir: &Path,
    week: u32,
    filter: &SupplementaryFilter,
    config: &AnalysisConfig,
) -> Result<WeekOutput> {
    let raw = load_week(data_dir, week)?;
    let prepared = prepare_week(raw.pre, raw.post, filter, config);
    let report = clv_core::analyze_plays(&prepared.plays, config);

    let summary = WeekSummary {
        week,
        plays: prepared.plays.len(),
        analyzed: report.results.len(),
        excluded: report.excluded_total(),
        dropped: prepared.dropped.len(),
        filtered_out: prepared.filtered_out,
        stitch_anomalies: prepared.stitch_reports.iter().filter(|r| r.has_anomaly()).count(),
    };
    Ok(WeekOutput {
        summary,
        plays: prepared.plays,
        report,
    })
}

/// Analyze each week and stream its frames out. Input errors skip the
/// week; frame export errors end the run.
fn process_weeks<W: Write>(
    options: &PipelineOptions,
    filter: &SupplementaryFilter,
    frames: &mut FrameWriter<W>,
    report: &mut RunReport,
    summary: &mut RunSummary,
) -> Result<()> {
    for &week in &options.weeks {
        let output = match analyze_week(&options.data_dir, week, filter, &options.config) {
            Ok(output) => output,
            Err(e) => {
                warn!(week, error = %format!("{:#}", e), "skipping week");
                summary.weeks_skipped.push(week);
                continue;
            }
        };

        frames
            .write_plays(&output.plays)
            .with_context(|| format!("Failed to export frames for week {}", week))?;
        info!(
            week,
            plays = output.summary.plays,
            analyzed = output.summary.analyzed,
            excluded = output.summary.excluded,
            "week complete"
        );
        report.merge(output.report);
        summary.weeks.push(output.summary);
    }
    Ok(())
}

/// Run every requested week and write the exports plus the summary.
pub fn run(options: &PipelineOptions) -> Result<RunSummary> {
    options.config.validate().context("Invalid analysis config")?;

    let supplementary_path = options.supplementary_path();
    let supplementary = load_supplementary(&supplementary_path)?;
    let filter = SupplementaryFilter::from_rows(&supplementary);
    info!(
        admitted = filter.len(),
        rejected = filter.rejected(),
        "supplementary filter ready"
    );

    let frames_path = options.out_dir.join(FRAMES_FILE);
    let metrics_path = options.out_dir.join(METRICS_FILE);
    let leaderboards_path = options.out_dir.join(LEADERBOARDS_FILE);
    let mut frames = FrameWriter::create(&frames_path)?;
    let mut report = RunReport::default();
    let mut summary = RunSummary::default();

    process_weeks(options, &filter, &mut frames, &mut report, &mut summary)?;

    apply_ceoe(&mut report.results);
    report.results.sort_by_key(|r| (r.game_id, r.play_id));
    write_metrics(&metrics_path, &report.results)?;
    write_leaderboards(
        &leaderboards_path,
        &Leaderboards::build(&report.results, options.min_plays),
    )?;

    summary.frame_rows = frames.finish()?;
    summary.created_at = chrono::Utc::now().to_rfc3339();
    summary.plays_seen = report.plays_seen;
    summary.plays_analyzed = report.results.len();
    summary.exclusions = report
        .exclusions
        .iter()
        .map(|(reason, n)| (reason.as_str().to_string(), *n))
        .collect();
    summary.frames_path = frames_path;
    summary.metrics_path = metrics_path;
    summary.leaderboards_path = leaderboards_path;

    save_summary(&options.out_dir.join(SUMMARY_FILE), &summary)?;
    info!(
        weeks = summary.weeks.len(),
        skipped = summary.weeks_skipped.len(),
        analyzed = summary.plays_analyzed,
        "run complete"
    );
    Ok(summary)
}

pub fn save_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write summary: {}", path.display()))?;
    Ok(())
}
