use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{error, info};

use super::{RawSample, TelemetrySample};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("telemetry data unavailable at {}: {source}", .path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `index` is the first offending record, or `None` when the
    /// document itself is not an array of records.
    #[error(
        "telemetry dataset violates schema{}: {reason}",
        .index.map(|i| format!(" at record {i}")).unwrap_or_default()
    )]
    SchemaViolation {
        index: Option<usize>,
        reason: String,
    },
}

/// Lazily loaded, read-only view of the telemetry dataset.
///
/// The first successful `load_samples()` populates the cache and every
/// later call borrows the same slice. Concurrent first callers wait on
/// a single load. A failed load is not cached, so the next request
/// tries the file again.
#[derive(Debug)]
pub struct SampleStore {
    source: PathBuf,
    samples: OnceCell<Vec<TelemetrySample>>,
}

impl SampleStore {
    /// No I/O happens until the first `load_samples()`.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            samples: OnceCell::new(),
        }
    }

    /// A store that is already populated and never touches the disk.
    pub fn from_samples(samples: Vec<TelemetrySample>) -> Self {
        Self {
            source: PathBuf::new(),
            samples: OnceCell::from(samples),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.samples.initialized()
    }

    pub async fn load_samples(&self) -> Result<&[TelemetrySample], StoreError> {
        let samples = self
            .samples
            .get_or_try_init(|| async {
                let loaded = read_dataset(&self.source).await;
                match &loaded {
                    Ok(samples) => info!(
                        path = %self.source.display(),
                        samples = samples.len(),
                        regions = count_regions(samples),
                        "telemetry dataset loaded"
                    ),
                    Err(e) => error!(
                        path = %self.source.display(),
                        error = %e,
                        "telemetry dataset failed to load"
                    ),
                }
                loaded
            })
            .await?;

        Ok(samples.as_slice())
    }
}

async fn read_dataset(path: &Path) -> Result<Vec<TelemetrySample>, StoreError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|source| {
        StoreError::DataUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })?;

    parse_samples(&raw)
}

/// Parse a JSON array of records, failing on the first bad one.
/// The dataset order is preserved.
pub fn parse_samples(raw: &str) -> Result<Vec<TelemetrySample>, StoreError> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(raw).map_err(|e| StoreError::SchemaViolation {
            index: None,
            reason: format!("expected a JSON array of records: {e}"),
        })?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let violation = |reason: String| StoreError::SchemaViolation {
                index: Some(index),
                reason,
            };
            let raw: RawSample =
                serde_json::from_value(value).map_err(|e| violation(e.to_string()))?;
            TelemetrySample::try_from(raw).map_err(violation)
        })
        .collect()
}

fn count_regions(samples: &[TelemetrySample]) -> usize {
    samples
        .iter()
        .map(|s| s.region.to_lowercase())
        .collect::<HashSet<_>>()
        .len()
}
