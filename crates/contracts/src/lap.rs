//! LapTelemetry - Telemetry Source 输出
//!
//! 单圈原始遥测数据结构。

use serde::{Deserialize, Serialize};

use crate::{ContractError, DriverCode};

/// 平面位置（赛道世界坐标）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackPoint {
    pub x: f64,
    pub y: f64,
}

/// 单个遥测采样点
///
/// 按赛道里程索引的一次测量。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// 距发车线里程 (米)
    pub distance: f64,

    /// 车速 (km/h，非负)
    pub speed: f64,

    /// 平面位置 (可选)
    #[serde(default)]
    pub position: Option<TrackPoint>,

    /// 油门开度 0-100 (可选)
    #[serde(default)]
    pub throttle: Option<f64>,

    /// 刹车 0-100 (可选)
    #[serde(default)]
    pub brake: Option<f64>,
}

impl TelemetrySample {
    /// 仅含里程与车速的采样点
    pub fn speed_only(distance: f64, speed: f64) -> Self {
        Self {
            distance,
            speed,
            position: None,
            throttle: None,
            brake: None,
        }
    }
}

/// 单圈遥测轨迹
///
/// 不变量：非空，distance 升序（允许相等）。构造时排序并校验。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryTrace {
    samples: Vec<TelemetrySample>,
}

impl TelemetryTrace {
    /// 构造轨迹：校验后按里程升序排序
    ///
    /// # Errors
    /// - 空轨迹
    /// - 非有限的里程或车速
    /// - 负车速
    pub fn new(mut samples: Vec<TelemetrySample>) -> Result<Self, ContractError> {
        if samples.is_empty() {
            return Err(ContractError::invalid_input(
                "trace",
                "trace must contain at least one sample",
            ));
        }

        for (i, sample) in samples.iter().enumerate() {
            if !sample.distance.is_finite() || !sample.speed.is_finite() {
                return Err(ContractError::invalid_input(
                    "trace",
                    format!("non-finite distance or speed at sample {i}"),
                ));
            }
            if sample.speed < 0.0 {
                return Err(ContractError::invalid_input(
                    "trace",
                    format!("negative speed {} at sample {i}", sample.speed),
                ));
            }
        }

        // 提供方顺序不可信，按里程排序
        samples.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        Ok(Self { samples })
    }

    /// 采样点切片（升序）
    #[inline]
    pub fn samples(&self) -> &[TelemetrySample] {
        &self.samples
    }

    /// 采样点数量（恒 >= 1）
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 最大里程（最后一个采样点）
    #[inline]
    pub fn max_distance(&self) -> f64 {
        self.samples.last().map(|s| s.distance).unwrap_or(0.0)
    }

    /// 是否携带位置通道（任一采样点有位置即可，缺口由重采样补齐）
    pub fn has_position(&self) -> bool {
        self.samples.iter().any(|s| s.position.is_some())
    }
}

/// 单圈遥测 + 圈信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LapTelemetry {
    /// 车手代码
    pub driver: DriverCode,

    /// 圈速 (秒，可选，仅用于展示)
    #[serde(default)]
    pub lap_time: Option<f64>,

    /// 遥测轨迹
    pub trace: TelemetryTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_trace_rejected() {
        let result = TelemetryTrace::new(vec![]);
        assert!(matches!(
            result,
            Err(ContractError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_trace_sorted_on_construction() {
        let trace = TelemetryTrace::new(vec![
            TelemetrySample::speed_only(200.0, 250.0),
            TelemetrySample::speed_only(0.0, 80.0),
            TelemetrySample::speed_only(100.0, 180.0),
        ])
        .unwrap();

        let distances: Vec<f64> = trace.samples().iter().map(|s| s.distance).collect();
        assert_eq!(distances, vec![0.0, 100.0, 200.0]);
        assert_eq!(trace.max_distance(), 200.0);
    }

    #[test]
    fn test_negative_speed_rejected() {
        let result = TelemetryTrace::new(vec![TelemetrySample::speed_only(0.0, -1.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = TelemetryTrace::new(vec![TelemetrySample::speed_only(f64::NAN, 100.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_has_position() {
        let mut sample = TelemetrySample::speed_only(0.0, 100.0);
        assert!(!TelemetryTrace::new(vec![sample]).unwrap().has_position());

        sample.position = Some(TrackPoint { x: 1.0, y: 2.0 });
        assert!(TelemetryTrace::new(vec![sample]).unwrap().has_position());
    }
}
