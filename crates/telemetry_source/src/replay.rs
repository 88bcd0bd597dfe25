//! Replay Lap Source - 从录制目录回放圈速数据
//!
//! 读取录制工具导出的 JSONL 文件，按查询提供已录制的单圈遥测。

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use contracts::{
    ContractError, LapQuery, LapSource, LapTelemetry, SessionType, TelemetrySample,
    TelemetryTrace, TrackPoint,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::SourceError;

/// JSONL 中的单圈记录
#[derive(Debug, Clone, Deserialize)]
struct LapRecord {
    driver: String,
    year: u16,
    event: String,
    session: String,

    #[serde(default)]
    lap_time: Option<f64>,

    samples: Vec<SampleRecord>,
}

/// 单圈记录中的采样点
#[derive(Debug, Clone, Copy, Deserialize)]
struct SampleRecord {
    distance: f64,
    speed: f64,

    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    throttle: Option<f64>,
    #[serde(default)]
    brake: Option<f64>,
}

impl SampleRecord {
    fn to_sample(self) -> TelemetrySample {
        TelemetrySample {
            distance: self.distance,
            speed: self.speed,
            // 位置通道要求 x/y 成对出现
            position: match (self.x, self.y) {
                (Some(x), Some(y)) => Some(TrackPoint { x, y }),
                _ => None,
            },
            throttle: self.throttle,
            brake: self.brake,
        }
    }
}

/// Replay 圈速数据源
///
/// 启动时整文件装载；查询按 (year, event, session, driver) 匹配，
/// event 与 driver 大小写不敏感。
#[derive(Debug)]
pub struct ReplayLapSource {
    records: Vec<LapRecord>,
}

impl ReplayLapSource {
    /// 从录制目录装载 (目录下需有 laps.jsonl)
    pub fn load(recording_dir: &Path) -> Result<Self, SourceError> {
        let path = recording_dir.join("laps.jsonl");
        let file = File::open(&path)?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record: LapRecord =
                serde_json::from_str(&line).map_err(|e| SourceError::MalformedRecord {
                    line: idx + 1,
                    message: e.to_string(),
                })?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(SourceError::EmptyRecording);
        }

        info!(
            path = %path.display(),
            laps = records.len(),
            "loaded lap recording"
        );

        Ok(Self { records })
    }

    fn matches(record: &LapRecord, query: &LapQuery) -> bool {
        let session = record
            .session
            .parse::<SessionType>()
            .unwrap_or(SessionType::Q);

        record.year == query.year
            && record.event.eq_ignore_ascii_case(&query.event)
            && session == query.session
            && query.driver == record.driver.to_ascii_uppercase()
    }
}

impl LapSource for ReplayLapSource {
    fn name(&self) -> &str {
        "replay"
    }

    async fn fetch_lap(&self, query: &LapQuery) -> Result<LapTelemetry, ContractError> {
        let record = self
            .records
            .iter()
            .find(|record| Self::matches(record, query))
            .ok_or_else(|| {
                ContractError::provider(query.to_string(), "no recorded lap matches the query")
            })?;

        let trace = TelemetryTrace::new(
            record
                .samples
                .iter()
                .map(|sample| sample.to_sample())
                .collect(),
        )?;

        metrics::counter!("lap_delta_laps_fetched_total", "source" => "replay").increment(1);
        debug!(query = %query, samples = trace.len(), "replayed recorded lap");

        Ok(LapTelemetry {
            driver: query.driver.clone(),
            lap_time: record.lap_time,
            trace,
        })
    }
}
