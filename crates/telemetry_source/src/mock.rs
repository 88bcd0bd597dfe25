//! Mock 圈速数据源
//!
//! 用于无外部遥测提供方环境的测试。

use contracts::{
    ContractError, LapQuery, LapSource, LapTelemetry, TelemetrySample, TelemetryTrace, TrackPoint,
};
use tracing::debug;

/// Mock 数据源配置
#[derive(Debug, Clone)]
pub struct MockLapConfig {
    /// 圈长 (米)
    pub lap_length: f64,

    /// 每圈采样点数
    pub samples: usize,

    /// 基准车速 (km/h)
    pub base_speed: f64,

    /// 速度波动幅度 (km/h)
    pub speed_swing: f64,

    /// 是否生成位置通道
    pub with_position: bool,
}

impl Default for MockLapConfig {
    fn default() -> Self {
        Self {
            lap_length: 5000.0,
            samples: 700,
            base_speed: 180.0,
            speed_swing: 90.0,
            with_position: true,
        }
    }
}

/// Mock 圈速数据源
///
/// 对任意车手生成确定性的合成圈：速度剖面由车手代码派生一个固定偏移，
/// 同一查询永远得到同一条轨迹。
pub struct MockLapSource {
    config: MockLapConfig,
}

impl MockLapSource {
    /// 创建新的 Mock 数据源
    pub fn new(config: MockLapConfig) -> Self {
        Self { config }
    }

    /// 街道赛道预设：短圈、低均速
    pub fn street_circuit() -> Self {
        Self::new(MockLapConfig {
            lap_length: 3337.0,
            base_speed: 140.0,
            speed_swing: 80.0,
            ..Default::default()
        })
    }

    /// 高速赛道预设：长圈、高均速
    pub fn power_circuit() -> Self {
        Self::new(MockLapConfig {
            lap_length: 5793.0,
            base_speed: 220.0,
            speed_swing: 110.0,
            ..Default::default()
        })
    }

    /// 无位置通道的数据源（仅速度对比可用）
    pub fn speed_only() -> Self {
        Self::new(MockLapConfig {
            with_position: false,
            ..Default::default()
        })
    }

    /// 车手代码派生的速度偏移 (km/h)，确定性
    fn driver_offset(driver: &str) -> f64 {
        let sum: u32 = driver.bytes().map(u32::from).sum();
        (sum % 11) as f64 - 5.0
    }

    /// 生成一条合成轨迹
    fn build_trace(&self, offset: f64) -> Result<TelemetryTrace, ContractError> {
        let config = &self.config;
        let radius = config.lap_length / std::f64::consts::TAU;
        let last = config.samples.saturating_sub(1).max(1);

        let samples = (0..config.samples)
            .map(|i| {
                let distance = config.lap_length * i as f64 / last as f64;
                let phase = distance / config.lap_length * std::f64::consts::TAU;

                // 三个"弯角"的速度剖面，始终为正
                let speed =
                    (config.base_speed + offset + config.speed_swing * (3.0 * phase).sin())
                        .max(30.0);

                let throttle = ((3.0 * phase).sin() * 50.0 + 50.0).clamp(0.0, 100.0);
                let brake = if (3.0 * phase).sin() < -0.6 { 100.0 } else { 0.0 };

                TelemetrySample {
                    distance,
                    speed,
                    position: config.with_position.then(|| TrackPoint {
                        x: radius * phase.cos(),
                        y: radius * phase.sin(),
                    }),
                    throttle: Some(throttle),
                    brake: Some(brake),
                }
            })
            .collect();

        TelemetryTrace::new(samples)
    }

    /// 按轨迹积分出圈速 (秒)，与 delta 计算同一时间模型
    fn integrate_lap_time(trace: &TelemetryTrace) -> f64 {
        trace
            .samples()
            .windows(2)
            .map(|pair| {
                let step = pair[1].distance - pair[0].distance;
                let v = (pair[0].speed + pair[1].speed) / 2.0 / 3.6;
                step / v
            })
            .sum()
    }
}

impl LapSource for MockLapSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_lap(&self, query: &LapQuery) -> Result<LapTelemetry, ContractError> {
        let offset = Self::driver_offset(&query.driver);
        let trace = self.build_trace(offset)?;
        let lap_time = Self::integrate_lap_time(&trace);

        metrics::counter!("lap_delta_laps_fetched_total", "source" => "mock").increment(1);
        debug!(
            query = %query,
            samples = trace.len(),
            lap_time,
            "mock lap generated"
        );

        Ok(LapTelemetry {
            driver: query.driver.clone(),
            lap_time: Some(lap_time),
            trace,
        })
    }
}
