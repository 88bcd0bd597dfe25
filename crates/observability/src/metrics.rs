//! 对比引擎指标收集模块
//!
//! 基于 ComparisonMeta 收集和统计对比引擎的运行指标。

use contracts::ComparisonMeta;
use metrics::{counter, gauge, histogram};

/// 从 ComparisonMeta 记录指标
///
/// 每次产生 DriverComparison 时调用此函数来记录指标。
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_comparison_metrics;
///
/// let comparison = engine.compare(&lap_a, &lap_b)?;
/// record_comparison_metrics(&comparison.meta);
/// ```
pub fn record_comparison_metrics(meta: &ComparisonMeta) {
    // 对比计数器
    counter!("lap_delta_comparisons_recorded_total").increment(1);

    // 公共里程跨度 (米)
    gauge!("lap_delta_last_grid_span_m").set(meta.grid_span);
    histogram!("lap_delta_grid_span_m_hist").record(meta.grid_span);

    // 终点累计时间差 (秒)
    gauge!("lap_delta_last_final_delta_s").set(meta.final_delta);
    histogram!("lap_delta_final_delta_abs_s_hist").record(meta.final_delta.abs());

    // 原始采样数
    histogram!("lap_delta_raw_samples_hist", "driver" => "a").record(meta.raw_samples_a as f64);
    histogram!("lap_delta_raw_samples_hist", "driver" => "b").record(meta.raw_samples_b as f64);

    // 优势分段
    let total_segments = meta.segments_a_faster + meta.segments_b_faster;
    if total_segments > 0 {
        counter!("lap_delta_maps_built_total").increment(1);
        let ratio = meta.segments_a_faster as f64 / total_segments as f64;
        gauge!("lap_delta_dominance_a_ratio").set(ratio);
        histogram!("lap_delta_dominance_a_ratio_hist").record(ratio);
    } else {
        counter!("lap_delta_comparisons_without_map_total").increment(1);
    }
}

/// 记录单圈拉取
pub fn record_lap_fetched(source: &str, driver: &str) {
    counter!(
        "lap_delta_laps_served_total",
        "source" => source.to_string(),
        "driver" => driver.to_string()
    )
    .increment(1);
}

/// 记录对比耗时 (从拉取完成到输出装配)
pub fn record_compare_duration_ms(duration_ms: f64) {
    histogram!("lap_delta_compare_duration_ms").record(duration_ms);
}

/// 对比指标聚合器
///
/// 在内存中聚合指标，便于统计和输出摘要。
#[derive(Debug, Clone, Default)]
pub struct ComparisonMetricsAggregator {
    /// 总对比数
    pub total_comparisons: u64,

    /// 含赛道图的对比数
    pub comparisons_with_map: u64,

    /// 公共跨度统计 (米)
    pub span_stats: RunningStats,

    /// 终点时间差绝对值统计 (秒)
    pub final_delta_stats: RunningStats,

    /// 车手 A 优势分段占比统计
    pub dominance_stats: RunningStats,
}

impl ComparisonMetricsAggregator {
    /// 创建新的聚合器
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新聚合统计
    pub fn update(&mut self, meta: &ComparisonMeta) {
        self.total_comparisons += 1;

        self.span_stats.push(meta.grid_span);
        self.final_delta_stats.push(meta.final_delta.abs());

        let total_segments = meta.segments_a_faster + meta.segments_b_faster;
        if total_segments > 0 {
            self.comparisons_with_map += 1;
            self.dominance_stats
                .push(meta.segments_a_faster as f64 / total_segments as f64);
        }
    }

    /// 生成摘要报告
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_comparisons: self.total_comparisons,
            comparisons_with_map: self.comparisons_with_map,
            map_rate: if self.total_comparisons > 0 {
                self.comparisons_with_map as f64 / self.total_comparisons as f64 * 100.0
            } else {
                0.0
            },
            grid_span_m: StatsSummary::from(&self.span_stats),
            final_delta_s: StatsSummary::from(&self.final_delta_stats),
            dominance_a_ratio: StatsSummary::from(&self.dominance_stats),
        }
    }

    /// 重置统计
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 指标摘要
#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    pub total_comparisons: u64,
    pub comparisons_with_map: u64,
    pub map_rate: f64,
    pub grid_span_m: StatsSummary,
    pub final_delta_s: StatsSummary,
    pub dominance_a_ratio: StatsSummary,
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Comparison Metrics Summary ===")?;
        writeln!(f, "Total comparisons: {}", self.total_comparisons)?;
        writeln!(
            f,
            "With dominance map: {} ({:.2}%)",
            self.comparisons_with_map, self.map_rate
        )?;
        writeln!(f, "Grid span (m): {}", self.grid_span_m)?;
        writeln!(f, "Final |delta| (s): {}", self.final_delta_s)?;
        writeln!(f, "Dominance A ratio: {}", self.dominance_a_ratio)?;

        Ok(())
    }
}

/// 统计摘要
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count(),
            min: stats.min(),
            max: stats.max(),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计计算器 (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 添加新值
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// 样本数量
    pub fn count(&self) -> u64 {
        self.count
    }

    /// 均值
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 方差
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// 标准差
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// 最小值
    pub fn min(&self) -> f64 {
        self.min
    }

    /// 最大值
    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_stats() {
        let mut stats = RunningStats::default();

        stats.push(1.0);
        stats.push(2.0);
        stats.push(3.0);
        stats.push(4.0);
        stats.push(5.0);

        assert_eq!(stats.count(), 5);
        assert!((stats.mean() - 3.0).abs() < 1e-10);
        assert!((stats.min() - 1.0).abs() < 1e-10);
        assert!((stats.max() - 5.0).abs() < 1e-10);
        assert!((stats.variance() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_aggregator_update() {
        let mut aggregator = ComparisonMetricsAggregator::new();

        let meta = ComparisonMeta {
            raw_samples_a: 680,
            raw_samples_b: 655,
            grid_span: 5240.0,
            speed_points: 500,
            map_points: Some(1000),
            segments_a_faster: 600,
            segments_b_faster: 399,
            final_delta: -0.42,
        };

        aggregator.update(&meta);

        assert_eq!(aggregator.total_comparisons, 1);
        assert_eq!(aggregator.comparisons_with_map, 1);
        assert!((aggregator.dominance_stats.mean() - 600.0 / 999.0).abs() < 1e-12);
        assert!((aggregator.final_delta_stats.mean() - 0.42).abs() < 1e-12);
    }

    #[test]
    fn test_aggregator_without_map() {
        let mut aggregator = ComparisonMetricsAggregator::new();

        let meta = ComparisonMeta {
            raw_samples_a: 100,
            raw_samples_b: 100,
            grid_span: 4000.0,
            speed_points: 500,
            map_points: None,
            segments_a_faster: 0,
            segments_b_faster: 0,
            final_delta: 0.1,
        };

        aggregator.update(&meta);

        assert_eq!(aggregator.total_comparisons, 1);
        assert_eq!(aggregator.comparisons_with_map, 0);
        assert_eq!(aggregator.dominance_stats.count(), 0);
    }

    #[test]
    fn test_summary_display() {
        let summary = MetricsSummary {
            total_comparisons: 12,
            comparisons_with_map: 9,
            map_rate: 75.0,
            grid_span_m: StatsSummary {
                count: 12,
                min: 3337.0,
                max: 7004.0,
                mean: 5100.0,
                std_dev: 900.0,
            },
            final_delta_s: StatsSummary::default(),
            dominance_a_ratio: StatsSummary::default(),
        };

        let output = format!("{}", summary);
        assert!(output.contains("Total comparisons: 12"));
        assert!(output.contains("75.00%"));
    }
}
