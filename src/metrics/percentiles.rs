use super::MetricsError;

/// Nearest-rank percentile over an unsorted slice.
///
/// `rank` is a fraction in (0, 1], e.g. 0.95 for p95. The value at
/// sorted index `max(ceil(rank * n) - 1, 0)` is returned, clamped to
/// the last element. No interpolation: the result is always one of
/// the inputs.
pub fn percentile(values: &[f64], rank: f64) -> Result<f64, MetricsError> {
    if values.is_empty() {
        return Err(MetricsError::EmptyPercentileInput);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let index = ((rank * count as f64).ceil() as i64 - 1).max(0) as usize;

    Ok(sorted[index.min(count - 1)])
}
