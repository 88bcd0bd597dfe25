//! Main comparison engine implementation.

use contracts::{
    AlignedPair, AlignmentConfig, CommonGrid, ComparisonMeta, ContractError, DeltaSeries,
    DominanceMap, Driver, DriverComparison, LapTelemetry,
};
use tracing::instrument;

use crate::delta::compute_speed_delta;
use crate::dominance::{classify_dominance, locate_sector_markers, speed_advantage};
use crate::grid::build_common_grid;
use crate::resample::resample_to_grid;

/// Two-driver comparison engine
///
/// A pure function of its two input laps and the alignment configuration:
/// owns no shared state, never retries, and is safe to invoke concurrently
/// for independent driver pairs. Both original consumption paths (the
/// interactive view and the batch comparison) go through this single entry
/// point so tie-break and interpolation semantics cannot drift.
#[derive(Debug, Clone)]
pub struct ComparisonEngine {
    /// Configuration
    config: AlignmentConfig,
}

impl ComparisonEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: AlignmentConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    /// Compare two laps.
    ///
    /// Resamples both traces onto the speed grid, computes the cumulative
    /// time delta, and, when both traces carry position channels, builds
    /// the track-dominance map on the higher-resolution map grid.
    ///
    /// # Errors
    /// `InvalidInput`, `InvalidSpeed`, or `LengthMismatch`; never partial
    /// output.
    #[instrument(
        name = "comparison_engine_compare",
        skip(self, lap_a, lap_b),
        fields(driver_a = %lap_a.driver, driver_b = %lap_b.driver)
    )]
    pub fn compare(
        &self,
        lap_a: &LapTelemetry,
        lap_b: &LapTelemetry,
    ) -> Result<DriverComparison, ContractError> {
        let grid = build_common_grid(&lap_a.trace, &lap_b.trace, self.config.speed_points)?;
        let aligned = AlignedPair {
            a: resample_to_grid(&lap_a.trace, &grid),
            b: resample_to_grid(&lap_b.trace, &grid),
        };
        let delta = compute_speed_delta(&grid, &aligned.a.speed, &aligned.b.speed)?;

        let map = if lap_a.trace.has_position() && lap_b.trace.has_position() {
            Some(self.build_map(lap_a, lap_b)?)
        } else {
            tracing::debug!("position channel missing, skipping dominance map");
            None
        };

        let meta = Self::build_meta(lap_a, lap_b, &grid, &delta, map.as_ref());
        Self::record_comparison_metrics(&meta);

        Ok(DriverComparison {
            driver_a: lap_a.driver.clone(),
            driver_b: lap_b.driver.clone(),
            lap_time_a: lap_a.lap_time,
            lap_time_b: lap_b.lap_time,
            grid,
            aligned,
            delta,
            map,
            meta,
        })
    }

    /// Build the track-dominance map on the map-resolution grid.
    #[instrument(name = "comparison_engine_build_map", level = "debug", skip_all)]
    fn build_map(
        &self,
        lap_a: &LapTelemetry,
        lap_b: &LapTelemetry,
    ) -> Result<DominanceMap, ContractError> {
        let grid = build_common_grid(&lap_a.trace, &lap_b.trace, self.config.map_points)?;
        let aligned_a = resample_to_grid(&lap_a.trace, &grid);
        let aligned_b = resample_to_grid(&lap_b.trace, &grid);

        let line = aligned_a.positions.ok_or_else(|| {
            ContractError::invalid_input("map", "driver A trace lacks a usable position channel")
        })?;

        let advantage = speed_advantage(&aligned_a.speed, &aligned_b.speed)?;
        let segments = classify_dominance(&line, &advantage)?;
        let markers = locate_sector_markers(&grid, &line, &self.config.marker_fractions)?;

        Ok(DominanceMap {
            grid,
            line,
            speed_advantage: advantage,
            segments,
            markers,
        })
    }

    fn build_meta(
        lap_a: &LapTelemetry,
        lap_b: &LapTelemetry,
        grid: &CommonGrid,
        delta: &DeltaSeries,
        map: Option<&DominanceMap>,
    ) -> ComparisonMeta {
        let (segments_a_faster, segments_b_faster) = map
            .map(|m| {
                let a = m
                    .segments
                    .iter()
                    .filter(|s| s.faster == Driver::A)
                    .count();
                (a, m.segments.len() - a)
            })
            .unwrap_or((0, 0));

        ComparisonMeta {
            raw_samples_a: lap_a.trace.len(),
            raw_samples_b: lap_b.trace.len(),
            grid_span: grid.max(),
            speed_points: grid.len(),
            map_points: map.map(|m| m.grid.len()),
            segments_a_faster,
            segments_b_faster,
            final_delta: delta.final_delta(),
        }
    }

    fn record_comparison_metrics(meta: &ComparisonMeta) {
        metrics::counter!("lap_delta_comparisons_total", "status" => "ok").increment(1);
        metrics::histogram!("lap_delta_grid_span_m").record(meta.grid_span);
        metrics::histogram!("lap_delta_final_delta_s").record(meta.final_delta);

        let total_segments = meta.segments_a_faster + meta.segments_b_faster;
        if total_segments > 0 {
            metrics::histogram!("lap_delta_dominance_a_ratio")
                .record(meta.segments_a_faster as f64 / total_segments as f64);
        }
    }
}
