//! Weekly file discovery and CSV loading.
//!
//! Layout under the data directory:
//! - `train/input_2023_wNN.csv` - pre-event rows (required per week)
//! - `train/output_2023_wNN.csv` - post-event rows (optional)
//! - `supplementary_data.csv` - play context

use crate::records::{InputRecord, OutputRecord, SupplementaryRecord};
use anyhow::{Context, Result};
use clv_core::models::{RawPostFrame, RawPreFrame, SupplementaryPlay};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const SUPPLEMENTARY_FILE: &str = "supplementary_data.csv";

/// Raw rows of one week.
#[derive(Debug, Clone, Default)]
pub struct WeekData {
    pub week: u32,
    pub pre: Vec<RawPreFrame>,
    pub post: Vec<RawPostFrame>,
}

/// `(input, output)` paths for a week.
pub fn week_paths(data_dir: &Path, week: u32) -> (PathBuf, PathBuf) {
    let train = data_dir.join("train");
    (
        train.join(format!("input_2023_w{:02}.csv", week)),
        train.join(format!("output_2023_w{:02}.csv", week)),
    )
}

fn read_csv<T, R>(path: &Path) -> Result<Vec<R>>
where
    T: DeserializeOwned,
    R: From<T>,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut rows = Vec::new();
    for (i, record) in reader.deserialize::<T>().enumerate() {
        let record = record
            .with_context(|| format!("Failed to parse row {} of {}", i + 2, path.display()))?;
        rows.push(R::from(record));
    }
    Ok(rows)
}

/// Load one week. A missing output file yields pre-event rows only.
pub fn load_week(data_dir: &Path, week: u32) -> Result<WeekData> {
    let (input, output) = week_paths(data_dir, week);
    let pre: Vec<RawPreFrame> = read_csv::<InputRecord, _>(&input)?;

    let post: Vec<RawPostFrame> = if output.exists() {
        read_csv::<OutputRecord, _>(&output)?
    } else {
        warn!(week, path = %output.display(), "no post-event file; pre-throw phase only");
        Vec::new()
    };

    debug!(week, pre = pre.len(), post = post.len(), "week loaded");
    Ok(WeekData { week, pre, post })
}

pub fn load_supplementary(path: &Path) -> Result<Vec<SupplementaryPlay>> {
    read_csv::<SupplementaryRecord, _>(path)
}
