//! Track-dominance classification and sector markers.

use contracts::{
    CommonGrid, ContractError, DominanceSegment, Driver, SectorMarker, TrackPoint,
};

/// Pointwise speed advantage `speed_a - speed_b` (km/h).
///
/// # Errors
/// `LengthMismatch` when the sequences differ in length.
pub fn speed_advantage(speed_a: &[f64], speed_b: &[f64]) -> Result<Vec<f64>, ContractError> {
    if speed_a.len() != speed_b.len() {
        return Err(ContractError::length_mismatch(
            "speed_a vs speed_b",
            speed_a.len(),
            speed_b.len(),
        ));
    }
    Ok(speed_a
        .iter()
        .zip(speed_b)
        .map(|(a, b)| a - b)
        .collect())
}

/// Classify dominance segments along driver A's resampled line.
///
/// Segment i runs from `line[i]` to `line[i+1]` and is labeled by the sign
/// of `advantage[i]`: positive means driver A, anything else (including an
/// exact zero) goes to driver B. N points yield exactly N-1 segments.
///
/// # Errors
/// `LengthMismatch` when line and advantage differ in length.
pub fn classify_dominance(
    line: &[TrackPoint],
    advantage: &[f64],
) -> Result<Vec<DominanceSegment>, ContractError> {
    if line.len() != advantage.len() {
        return Err(ContractError::length_mismatch(
            "line vs advantage",
            line.len(),
            advantage.len(),
        ));
    }

    Ok(line
        .windows(2)
        .zip(advantage)
        .map(|(pair, &adv)| DominanceSegment {
            from: pair[0],
            to: pair[1],
            faster: if adv > 0.0 { Driver::A } else { Driver::B },
        })
        .collect())
}

/// Locate sector annotation points at fractional lap distances.
///
/// For each fraction the target is `fraction * grid.max()`; the chosen point
/// is the grid index nearest that target, over the resampled grid (not the
/// raw trace). Display only, no effect on delta math.
///
/// # Errors
/// `LengthMismatch` when line and grid differ in length.
pub fn locate_sector_markers(
    grid: &CommonGrid,
    line: &[TrackPoint],
    fractions: &[f64],
) -> Result<Vec<SectorMarker>, ContractError> {
    if line.len() != grid.len() {
        return Err(ContractError::length_mismatch(
            "line vs grid",
            grid.len(),
            line.len(),
        ));
    }

    let span = grid.max();
    Ok(fractions
        .iter()
        .enumerate()
        .map(|(label_index, &fraction)| {
            let grid_index = nearest_grid_index(grid.points(), fraction * span);
            SectorMarker {
                label_index,
                fraction,
                grid_index,
                position: line[grid_index],
            }
        })
        .collect())
}

/// Index of the grid point nearest to `target` (grid is sorted ascending).
fn nearest_grid_index(points: &[f64], target: f64) -> usize {
    let upper = points.partition_point(|&p| p < target);

    if upper == 0 {
        return 0;
    }
    if upper == points.len() {
        return points.len() - 1;
    }

    let below = target - points[upper - 1];
    let above = points[upper] - target;
    if below < above {
        upper - 1
    } else {
        upper
    }
}
