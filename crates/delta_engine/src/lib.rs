//! # Delta Engine
//!
//! 遥测对齐与时间差计算引擎。
//!
//! 负责：
//! - 公共里程网格构建
//! - 最近邻重采样 + 缺口填充
//! - 累计时间差计算
//! - 赛道优势分段与扇区标记
//!
//! ## 使用示例
//!
//! ```ignore
//! use delta_engine::{AlignmentConfig, ComparisonEngine};
//!
//! let engine = ComparisonEngine::new(AlignmentConfig::default());
//!
//! let comparison = engine.compare(&lap_a, &lap_b)?;
//! println!("final delta: {:+.3}s", comparison.delta.final_delta());
//! ```

mod delta;
mod dominance;
mod engine;
mod grid;
mod resample;

// Re-exports
pub use contracts::AlignmentConfig;
pub use engine::ComparisonEngine;

pub use delta::compute_speed_delta;
pub use dominance::{classify_dominance, locate_sector_markers, speed_advantage};
pub use grid::build_common_grid;
pub use resample::resample_to_grid;

// Re-export contracts types
pub use contracts::{
    AlignedLap, AlignedPair, CommonGrid, ComparisonMeta, DeltaSeries, DominanceMap,
    DominanceSegment, Driver, DriverComparison, SectorMarker,
};
