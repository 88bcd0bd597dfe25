//! DriverComparison - Delta Engine output
//!
//! Aligned comparison data structures.

use serde::{Deserialize, Serialize};

use crate::{DriverCode, TrackPoint};

/// Shared distance axis both traces are resampled onto.
///
/// Invariant: strictly increasing, first element exactly 0. Constructed by
/// the delta engine; consumers treat it as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonGrid {
    points: Vec<f64>,
}

impl CommonGrid {
    /// Wrap a grid produced by the engine.
    pub fn new(points: Vec<f64>) -> Self {
        Self { points }
    }

    /// Grid distance values (meters, ascending).
    #[inline]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of grid points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest grid distance (the common lap span).
    #[inline]
    pub fn max(&self) -> f64 {
        self.points.last().copied().unwrap_or(0.0)
    }
}

/// One driver's channels resampled onto a grid.
///
/// Every present channel has exactly one entry per grid point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignedLap {
    /// Speed (km/h), always present
    pub speed: Vec<f64>,

    /// Planar positions, present when the raw trace carries them
    #[serde(default)]
    pub positions: Option<Vec<TrackPoint>>,

    /// Throttle 0-100, present when the raw trace carries it
    #[serde(default)]
    pub throttle: Option<Vec<f64>>,

    /// Brake 0-100, present when the raw trace carries it
    #[serde(default)]
    pub brake: Option<Vec<f64>>,
}

/// Both drivers' resampled channels for one grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignedPair {
    pub a: AlignedLap,
    pub b: AlignedLap,
}

/// Cumulative time delta along a grid (seconds).
///
/// `values[0]` is the first per-step contribution, not an anchored zero.
/// Positive at index i means driver A is cumulatively behind driver B.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaSeries {
    values: Vec<f64>,
}

impl DeltaSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Delta at the end of the common span (0.0 for an empty series).
    #[inline]
    pub fn final_delta(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }
}

/// Binary dominance label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Driver {
    A,
    B,
}

/// Track-map segment between consecutive resampled positions,
/// tagged with the driver holding the speed advantage over it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DominanceSegment {
    /// Segment start on driver A's resampled line
    pub from: TrackPoint,

    /// Segment end on driver A's resampled line
    pub to: TrackPoint,

    /// Faster driver (ties go to B)
    pub faster: Driver,
}

/// Annotation point at a fractional lap distance. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorMarker {
    /// Zero-based marker index (presentation decides the label text)
    pub label_index: usize,

    /// Requested fraction of the lap span
    pub fraction: f64,

    /// Grid index nearest the target distance
    pub grid_index: usize,

    /// Resampled position at that grid index
    pub position: TrackPoint,
}

/// Track-dominance map data: higher-resolution grid, driver A's line,
/// per-segment labels, and sector markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DominanceMap {
    /// Map-resolution grid
    pub grid: CommonGrid,

    /// Driver A's resampled position line (one point per grid point)
    pub line: Vec<TrackPoint>,

    /// Pointwise speed advantage `speed_a - speed_b` (km/h) on the map grid
    pub speed_advantage: Vec<f64>,

    /// N-1 labeled segments along the line
    pub segments: Vec<DominanceSegment>,

    /// Sector annotation points
    pub markers: Vec<SectorMarker>,
}

/// Complete two-driver comparison produced by the engine.
///
/// Plain structured data; formatting and rendering belong to the consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverComparison {
    /// Driver A identity
    pub driver_a: DriverCode,

    /// Driver B identity
    pub driver_b: DriverCode,

    /// Driver A lap time (seconds, when the provider knows it)
    pub lap_time_a: Option<f64>,

    /// Driver B lap time (seconds, when the provider knows it)
    pub lap_time_b: Option<f64>,

    /// Speed-resolution grid
    pub grid: CommonGrid,

    /// Both drivers' channels on the speed grid
    pub aligned: AlignedPair,

    /// Cumulative time delta on the speed grid
    pub delta: DeltaSeries,

    /// Track-dominance map, present only when both traces carry positions
    pub map: Option<DominanceMap>,

    /// Comparison metadata
    pub meta: ComparisonMeta,
}

/// Comparison metadata (diagnostics and metric recording).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonMeta {
    /// Raw sample count, driver A
    pub raw_samples_a: usize,

    /// Raw sample count, driver B
    pub raw_samples_b: usize,

    /// Common span both laps were compared over (meters)
    pub grid_span: f64,

    /// Speed grid resolution
    pub speed_points: usize,

    /// Map grid resolution (None when no map was built)
    pub map_points: Option<usize>,

    /// Dominance segments won by driver A
    pub segments_a_faster: usize,

    /// Dominance segments won by driver B (includes ties)
    pub segments_b_faster: usize,

    /// Cumulative delta at the end of the common span (seconds)
    pub final_delta: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_accessors() {
        let grid = CommonGrid::new(vec![0.0, 1.0, 2.0]);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.max(), 2.0);
        assert_eq!(grid.points()[0], 0.0);
    }

    #[test]
    fn test_delta_final() {
        let delta = DeltaSeries::new(vec![0.1, 0.2, -0.05]);
        assert_eq!(delta.final_delta(), -0.05);
        assert_eq!(DeltaSeries::new(vec![]).final_delta(), 0.0);
    }

    #[test]
    fn test_driver_serde() {
        assert_eq!(serde_json::to_string(&Driver::A).unwrap(), "\"a\"");
        let d: Driver = serde_json::from_str("\"b\"").unwrap();
        assert_eq!(d, Driver::B);
    }
}
