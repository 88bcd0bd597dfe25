//! Cumulative time-delta computation.

use contracts::{CommonGrid, ContractError, DeltaSeries};

/// km/h to m/s divisor
const KMH_PER_MS: f64 = 3.6;

/// Compute the cumulative time delta between two speed sequences on a grid.
///
/// Speeds are km/h and must be strictly positive. Per-index contribution is
/// `step[i] * (1/v_a[i] - 1/v_b[i])` seconds, with `step` the
/// centered-difference gradient of the grid distances; the result at i is
/// the running sum of contributions 0..=i. Positive delta means driver A is
/// cumulatively behind driver B.
///
/// # Errors
/// - `LengthMismatch` when either speed sequence disagrees with the grid
/// - `InvalidSpeed` on the first zero or negative speed, with no partial
///   output
pub fn compute_speed_delta(
    grid: &CommonGrid,
    speed_a: &[f64],
    speed_b: &[f64],
) -> Result<DeltaSeries, ContractError> {
    if speed_a.len() != grid.len() {
        return Err(ContractError::length_mismatch(
            "speed_a vs grid",
            grid.len(),
            speed_a.len(),
        ));
    }
    if speed_b.len() != grid.len() {
        return Err(ContractError::length_mismatch(
            "speed_b vs grid",
            grid.len(),
            speed_b.len(),
        ));
    }

    validate_speeds(speed_a)?;
    validate_speeds(speed_b)?;

    let steps = gradient(grid.points());

    let mut values = Vec::with_capacity(grid.len());
    let mut cumulative = 0.0;
    for i in 0..grid.len() {
        let v_a = speed_a[i] / KMH_PER_MS;
        let v_b = speed_b[i] / KMH_PER_MS;
        cumulative += steps[i] * (1.0 / v_a - 1.0 / v_b);
        values.push(cumulative);
    }

    Ok(DeltaSeries::new(values))
}

fn validate_speeds(speeds: &[f64]) -> Result<(), ContractError> {
    for (index, &value) in speeds.iter().enumerate() {
        if !(value > 0.0) {
            return Err(ContractError::InvalidSpeed { index, value });
        }
    }
    Ok(())
}

/// Centered-difference gradient.
///
/// Forward difference at the first point, backward at the last, and the
/// average of the two adjacent spacings in the interior, matching standard
/// numerical-gradient semantics.
fn gradient(points: &[f64]) -> Vec<f64> {
    let n = points.len();
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..n)
            .map(|i| {
                if i == 0 {
                    points[1] - points[0]
                } else if i == n - 1 {
                    points[n - 1] - points[n - 2]
                } else {
                    (points[i + 1] - points[i - 1]) / 2.0
                }
            })
            .collect(),
    }
}
