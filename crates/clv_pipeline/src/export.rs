//! Flat CSV exports.
//!
//! - `frames.csv` - continuous, normalized, metadata-complete frames
//! - `play_metrics.csv` - one row per analyzed play
//! - `leaderboards.json` - quarterback, decoy and victim aggregations

use anyhow::{Context, Result};
use clv_core::analysis::{
    gravity_board, puppeteer_board, victim_board, GravityEntry, PuppeteerEntry, VictimEntry,
};
use clv_core::models::{Phase, Play, PlayMetricsResult, PlayerRole, PlayerSide};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub const FRAMES_FILE: &str = "frames.csv";
pub const METRICS_FILE: &str = "play_metrics.csv";
pub const LEADERBOARDS_FILE: &str = "leaderboards.json";

/// Frame table row: the stitched frame plus the play's landing point.
#[derive(Debug, Serialize)]
struct FrameRow<'a> {
    game_id: i64,
    play_id: i64,
    nfl_id: i64,
    frame_id: i32,
    phase: Phase,
    x: f64,
    y: f64,
    s: Option<f64>,
    a: Option<f64>,
    dir: Option<f64>,
    o: Option<f64>,
    player_name: Option<&'a str>,
    player_position: Option<&'a str>,
    player_role: Option<&'a PlayerRole>,
    player_side: Option<PlayerSide>,
    ball_land_x: Option<f64>,
    ball_land_y: Option<f64>,
}

fn create_writer(path: &Path) -> Result<csv::Writer<File>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))
}

/// Streams plays into the frame table, one week at a time.
pub struct FrameWriter<W: Write = File> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl FrameWriter<File> {
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self {
            writer: create_writer(path)?,
            rows: 0,
        })
    }
}

impl<W: Write> FrameWriter<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            rows: 0,
        }
    }

    pub fn write_plays(&mut self, plays: &[Play]) -> Result<usize> {
        let before = self.rows;
        for play in plays {
            let (ball_land_x, ball_land_y) = match play.ball_land {
                Some((x, y)) => (Some(x), Some(y)),
                None => (None, None),
            };
            for f in &play.frames {
                self.writer
                    .serialize(FrameRow {
                        game_id: f.game_id,
                        play_id: f.play_id,
                        nfl_id: f.nfl_id,
                        frame_id: f.frame_id,
                        phase: f.phase,
                        x: f.x,
                        y: f.y,
                        s: f.speed,
                        a: f.acceleration,
                        dir: f.direction,
                        o: f.orientation,
                        player_name: f.player_name.as_deref(),
                        player_position: f.player_position.as_deref(),
                        player_role: f.player_role.as_ref(),
                        player_side: f.player_side,
                        ball_land_x,
                        ball_land_y,
                    })
                    .with_context(|| format!("Failed to write frame row for play {}", play.key))?;
                self.rows += 1;
            }
        }
        Ok(self.rows - before)
    }

    /// Flush and return the total row count.
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush().context("Failed to flush frame table")?;
        Ok(self.rows)
    }
}

pub fn write_metrics(path: &Path, results: &[PlayMetricsResult]) -> Result<usize> {
    let mut writer = create_writer(path)?;
    for row in results {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write metrics row {}/{}", row.game_id, row.play_id))?;
    }
    writer.flush().context("Failed to flush metrics table")?;
    Ok(results.len())
}

/// The three leaderboards over one results table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboards {
    pub min_plays: usize,
    pub puppeteers: Vec<PuppeteerEntry>,
    pub gravity: Vec<GravityEntry>,
    pub victims: Vec<VictimEntry>,
}

impl Leaderboards {
    pub fn build(results: &[PlayMetricsResult], min_plays: usize) -> Self {
        Self {
            min_plays,
            puppeteers: puppeteer_board(results, min_plays),
            gravity: gravity_board(results, min_plays),
            victims: victim_board(results, min_plays),
        }
    }
}

pub fn write_leaderboards(path: &Path, boards: &Leaderboards) -> Result<()> {
    let json = serde_json::to_string_pretty(boards)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write leaderboards: {}", path.display()))?;
    Ok(())
}

/// Read a metrics table back (for downstream consumers and audits).
pub fn read_metrics(path: &Path) -> Result<Vec<PlayMetricsResult>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<PlayMetricsResult>, _>>()
        .with_context(|| format!("Failed to parse metrics table: {}", path.display()))
}
