//! Nearest-neighbor resampling onto a common grid, with per-channel gap
//! filling for sparsely populated channels.

use contracts::{AlignedLap, CommonGrid, TelemetrySample, TelemetryTrace, TrackPoint};

/// Resample a trace onto the grid.
///
/// For each grid distance the nearest raw sample is selected; an exact
/// midpoint between two samples resolves to the later (greater-distance)
/// one. Channels that are only partially populated are completed afterwards
/// by [`fill_gaps`]; a channel with no valid values at all stays absent.
pub fn resample_to_grid(trace: &TelemetryTrace, grid: &CommonGrid) -> AlignedLap {
    let samples = trace.samples();
    let indices: Vec<usize> = grid
        .points()
        .iter()
        .map(|&distance| nearest_index(samples, distance))
        .collect();

    let speed = indices.iter().map(|&i| samples[i].speed).collect();

    let x = fill_gaps(
        indices
            .iter()
            .map(|&i| samples[i].position.map(|p| p.x))
            .collect(),
    );
    let y = fill_gaps(
        indices
            .iter()
            .map(|&i| samples[i].position.map(|p| p.y))
            .collect(),
    );
    let positions = match (x, y) {
        (Some(x), Some(y)) => Some(
            x.into_iter()
                .zip(y)
                .map(|(x, y)| TrackPoint { x, y })
                .collect(),
        ),
        _ => None,
    };

    let throttle = fill_gaps(indices.iter().map(|&i| samples[i].throttle).collect());
    let brake = fill_gaps(indices.iter().map(|&i| samples[i].brake).collect());

    AlignedLap {
        speed,
        positions,
        throttle,
        brake,
    }
}

/// Index of the sample nearest to `distance`.
///
/// Ties resolve to the later sample; this is the convention the resampling
/// tests pin down.
fn nearest_index(samples: &[TelemetrySample], distance: f64) -> usize {
    let upper = samples.partition_point(|s| s.distance < distance);

    if upper == 0 {
        return 0;
    }
    if upper == samples.len() {
        return samples.len() - 1;
    }

    let below = distance - samples[upper - 1].distance;
    let above = samples[upper].distance - distance;
    if below < above {
        upper - 1
    } else {
        upper
    }
}

/// Complete a partially populated channel.
///
/// Interior gaps are linearly interpolated between the nearest valid
/// neighbors in grid order; values before the first / after the last valid
/// entry carry that entry (no extrapolation). Returns `None` when the
/// channel has no valid values at all.
fn fill_gaps(values: Vec<Option<f64>>) -> Option<Vec<f64>> {
    let valid: Vec<usize> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|_| i))
        .collect();
    if valid.is_empty() {
        return None;
    }

    let mut filled = vec![0.0; values.len()];

    let first = valid[0];
    let last = *valid.last().unwrap();
    for i in 0..=first {
        filled[i] = values[first].unwrap();
    }
    for i in last..values.len() {
        filled[i] = values[last].unwrap();
    }

    for pair in valid.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        let (lo_value, hi_value) = (values[lo].unwrap(), values[hi].unwrap());
        filled[lo] = lo_value;
        filled[hi] = hi_value;
        for i in lo + 1..hi {
            let t = (i - lo) as f64 / (hi - lo) as f64;
            filled[i] = lo_value + t * (hi_value - lo_value);
        }
    }

    Some(filled)
}
