// Bucket-averaging downsampler for chart series
use crate::domain::telemetry::TimeSeriesPoint;

/// Bucket size that brings `len` points down to at most `max_points`, or
/// `None` when the series already fits.
pub fn bucket_size(len: usize, max_points: usize) -> Option<usize> {
    if max_points == 0 || len <= max_points {
        return None;
    }
    Some(len.div_ceil(max_points))
}

/// Downsample time series points using bucket averaging.
///
/// Each bucket keeps its middle point's timestamp and the mean of its values.
/// Series already within `max_points` are returned unchanged.
pub fn downsample_points(points: Vec<TimeSeriesPoint>, max_points: usize) -> Vec<TimeSeriesPoint> {
    match bucket_size(points.len(), max_points) {
        Some(size) => average_buckets(&points, size),
        None => points,
    }
}

/// Average consecutive runs of `bucket_size` points.
///
/// Series sharing a bucket size stay index-aligned: output position `i`
/// always covers input positions `i * bucket_size..(i + 1) * bucket_size`.
pub fn average_buckets(points: &[TimeSeriesPoint], bucket_size: usize) -> Vec<TimeSeriesPoint> {
    if bucket_size <= 1 {
        return points.to_vec();
    }

    let mut downsampled = Vec::with_capacity(points.len().div_ceil(bucket_size));

    for chunk in points.chunks(bucket_size) {
        let mid_idx = chunk.len() / 2;
        let avg_value = chunk.iter().map(|p| p.value).sum::<f64>() / chunk.len() as f64;

        downsampled.push(TimeSeriesPoint::new(chunk[mid_idx].time_ms, avg_value));
    }

    downsampled
}
