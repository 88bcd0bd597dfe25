//! Common distance grid construction.

use contracts::{CommonGrid, ContractError, TelemetryTrace};

/// Build the shared distance axis for two traces.
///
/// Spans `[0, min(max_a, max_b)]` with `point_count` evenly spaced values,
/// both endpoints inclusive.
///
/// # Errors
/// `InvalidInput` when either trace is empty, `point_count` is zero, or the
/// common span is not positive.
pub fn build_common_grid(
    trace_a: &TelemetryTrace,
    trace_b: &TelemetryTrace,
    point_count: usize,
) -> Result<CommonGrid, ContractError> {
    if trace_a.is_empty() || trace_b.is_empty() {
        return Err(ContractError::invalid_input(
            "grid",
            "both traces must contain at least one sample",
        ));
    }
    if point_count == 0 {
        return Err(ContractError::invalid_input(
            "grid",
            "point count must be > 0",
        ));
    }

    let limit = trace_a.max_distance().min(trace_b.max_distance());
    if limit <= 0.0 {
        return Err(ContractError::invalid_input(
            "grid",
            format!("non-positive common span {limit}"),
        ));
    }

    Ok(CommonGrid::new(linspace(0.0, limit, point_count)))
}

/// Evenly spaced values from `start` to `stop`, both endpoints inclusive.
fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 1 {
        return vec![start];
    }

    let step = (stop - start) / (count - 1) as f64;
    (0..count)
        .map(|i| {
            // Last point is pinned to `stop` so the grid ends exactly on the
            // common span regardless of rounding in the accumulated steps.
            if i == count - 1 {
                stop
            } else {
                start + step * i as f64
            }
        })
        .collect()
}
