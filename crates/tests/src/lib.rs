//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 模拟 e2e 测试（无需外部遥测提供方）
//! - 对齐引擎的跨 crate 性质测试

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        // 验证 contracts crate 可编译
        let _ = contracts::ConfigVersion::V1;
    }
}

#[cfg(test)]
mod e2e_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ComparisonConsumer, ContractError, DriverComparison, LapSource};
    use delta_engine::ComparisonEngine;
    use observability::ComparisonMetricsAggregator;
    use telemetry_source::MockLapSource;

    const PLAN_TOML: &str = r#"
[session]
year = 2024
event = "Monaco"
session = "Q"

[drivers]
a = "VER"
b = "LEC"

[alignment]
speed_points = 200
map_points = 400
"#;

    /// 收集输出的测试消费者
    #[derive(Default)]
    struct RecordingConsumer {
        seen: Vec<DriverComparison>,
    }

    impl ComparisonConsumer for RecordingConsumer {
        fn name(&self) -> &str {
            "recording"
        }

        async fn consume(
            &mut self,
            comparison: &DriverComparison,
        ) -> Result<(), ContractError> {
            self.seen.push(comparison.clone());
            Ok(())
        }
    }

    /// End-to-end test: plan -> source -> engine -> consumer
    ///
    /// 验证完整的数据流：
    /// 1. ConfigLoader 装载对比计划
    /// 2. MockLapSource 提供两条单圈遥测
    /// 3. ComparisonEngine 产出 DriverComparison
    /// 4. Consumer 接收结构化输出
    #[tokio::test]
    async fn test_e2e_mock_comparison() {
        let plan = ConfigLoader::load_from_str(PLAN_TOML, ConfigFormat::Toml).unwrap();
        let (query_a, query_b) = plan.queries();

        let source = MockLapSource::street_circuit();
        let lap_a = source.fetch_lap(&query_a).await.unwrap();
        let lap_b = source.fetch_lap(&query_b).await.unwrap();

        let engine = ComparisonEngine::new(plan.alignment.clone());
        let comparison = engine.compare(&lap_a, &lap_b).unwrap();

        assert_eq!(comparison.driver_a, "VER");
        assert_eq!(comparison.driver_b, "LEC");
        assert_eq!(comparison.grid.len(), 200);
        assert_eq!(comparison.delta.len(), 200);

        let map = comparison.map.as_ref().unwrap();
        assert_eq!(map.grid.len(), 400);
        assert_eq!(map.segments.len(), 399);
        assert_eq!(map.markers.len(), 2);

        let mut consumer = RecordingConsumer::default();
        consumer.consume(&comparison).await.unwrap();
        assert_eq!(consumer.seen.len(), 1);

        let mut aggregator = ComparisonMetricsAggregator::new();
        aggregator.update(&comparison.meta);
        let summary = aggregator.summary();
        assert_eq!(summary.total_comparisons, 1);
        assert_eq!(summary.comparisons_with_map, 1);
    }

    /// Mock 车手偏移不同，圈速必然不同，终点 delta 非零
    #[tokio::test]
    async fn test_e2e_distinct_drivers_produce_nonzero_delta() {
        let plan = ConfigLoader::load_from_str(PLAN_TOML, ConfigFormat::Toml).unwrap();
        let (query_a, query_b) = plan.queries();

        let source = MockLapSource::power_circuit();
        let lap_a = source.fetch_lap(&query_a).await.unwrap();
        let lap_b = source.fetch_lap(&query_b).await.unwrap();
        assert_ne!(lap_a.lap_time, lap_b.lap_time);

        let engine = ComparisonEngine::new(plan.alignment.clone());
        let comparison = engine.compare(&lap_a, &lap_b).unwrap();
        assert!(comparison.delta.final_delta().abs() > 1e-6);
    }

    /// 无位置通道时跳过赛道图，但速度对比仍完整
    #[tokio::test]
    async fn test_e2e_speed_only_source() {
        let plan = ConfigLoader::load_from_str(PLAN_TOML, ConfigFormat::Toml).unwrap();
        let (query_a, query_b) = plan.queries();

        let source = MockLapSource::speed_only();
        let lap_a = source.fetch_lap(&query_a).await.unwrap();
        let lap_b = source.fetch_lap(&query_b).await.unwrap();

        let engine = ComparisonEngine::new(plan.alignment.clone());
        let comparison = engine.compare(&lap_a, &lap_b).unwrap();

        assert!(comparison.map.is_none());
        assert_eq!(comparison.aligned.a.speed.len(), 200);
        assert_eq!(comparison.meta.map_points, None);
    }
}

#[cfg(test)]
mod property_tests {
    use contracts::{
        AlignmentConfig, CommonGrid, ContractError, Driver, LapTelemetry, TelemetrySample,
        TelemetryTrace,
    };
    use delta_engine::{
        build_common_grid, compute_speed_delta, resample_to_grid, ComparisonEngine,
    };

    fn constant_lap(driver: &str, speed: f64, max_distance: f64, samples: usize) -> LapTelemetry {
        let trace = TelemetryTrace::new(
            (0..samples)
                .map(|i| {
                    let distance = max_distance * i as f64 / (samples - 1) as f64;
                    TelemetrySample::speed_only(distance, speed)
                })
                .collect(),
        )
        .unwrap();
        LapTelemetry {
            driver: driver.into(),
            lap_time: None,
            trace,
        }
    }

    fn five_point_config() -> AlignmentConfig {
        AlignmentConfig {
            speed_points: 5,
            map_points: 5,
            marker_fractions: vec![],
        }
    }

    /// 常速定律：delta[i] = (i+1) * d * (1/vA - 1/vB)
    #[test]
    fn test_constant_speed_delta_law_through_engine() {
        let engine = ComparisonEngine::new(five_point_config());
        let lap_a = constant_lap("AAA", 10.0, 4.0, 5);
        let lap_b = constant_lap("BBB", 12.0, 4.0, 5);

        let comparison = engine.compare(&lap_a, &lap_b).unwrap();
        let expected = [0.06, 0.12, 0.18, 0.24, 0.30];
        for (value, expect) in comparison.delta.values().iter().zip(expected) {
            assert!((value - expect).abs() < 1e-9, "got {value}, want {expect}");
        }
    }

    /// 等速不变量：逐点相等的速度产生全零 delta
    #[test]
    fn test_equal_speed_invariant_through_engine() {
        let engine = ComparisonEngine::new(five_point_config());
        let lap_a = constant_lap("AAA", 150.0, 1000.0, 50);
        let lap_b = constant_lap("BBB", 150.0, 1000.0, 80);

        let comparison = engine.compare(&lap_a, &lap_b).unwrap();
        assert!(comparison.delta.values().iter().all(|&v| v.abs() < 1e-12));
    }

    /// 符号约定：交换 A/B 逐点取反
    #[test]
    fn test_sign_convention_swap() {
        let grid = CommonGrid::new(vec![0.0, 5.0, 10.0, 15.0]);
        let speed_a = [180.0, 220.0, 160.0, 240.0];
        let speed_b = [175.0, 230.0, 165.0, 235.0];

        let forward = compute_speed_delta(&grid, &speed_a, &speed_b).unwrap();
        let swapped = compute_speed_delta(&grid, &speed_b, &speed_a).unwrap();

        for (f, s) in forward.values().iter().zip(swapped.values()) {
            assert!((f + s).abs() < 1e-12);
        }
    }

    /// 网格边界性质：首元素恒为 0，末元素恒为 min(maxA, maxB)
    #[test]
    fn test_grid_bounds_property() {
        for (max_a, max_b, points) in [
            (5000.0, 4800.0, 500),
            (3337.5, 3337.5, 1000),
            (100.0, 7004.25, 2),
        ] {
            let lap_a = constant_lap("AAA", 100.0, max_a, 20);
            let lap_b = constant_lap("BBB", 100.0, max_b, 20);
            let grid = build_common_grid(&lap_a.trace, &lap_b.trace, points).unwrap();

            assert_eq!(grid.points()[0], 0.0);
            assert_eq!(grid.max(), f64::min(max_a, max_b));
            assert_eq!(grid.len(), points);
        }
    }

    /// 最近邻定律：参考向量固定平局约定
    #[test]
    fn test_nearest_neighbor_pinned_vector() {
        let trace = TelemetryTrace::new(vec![
            TelemetrySample::speed_only(0.0, 10.0),
            TelemetrySample::speed_only(2.0, 20.0),
            TelemetrySample::speed_only(4.0, 30.0),
        ])
        .unwrap();
        let grid = CommonGrid::new(vec![0.0, 1.0, 2.0, 3.0, 4.0]);

        let aligned = resample_to_grid(&trace, &grid);
        assert_eq!(aligned.speed, vec![10.0, 20.0, 20.0, 30.0, 30.0]);
    }

    /// 优势覆盖性质：N 点得到恰好 N-1 段，标签与符号一致
    #[test]
    fn test_dominance_total_coverage() {
        let engine = ComparisonEngine::new(AlignmentConfig {
            speed_points: 10,
            map_points: 25,
            marker_fractions: vec![1.0 / 3.0, 2.0 / 3.0],
        });

        let with_positions = |driver: &str, base: f64| {
            let trace = TelemetryTrace::new(
                (0..60)
                    .map(|i| {
                        let distance = 3000.0 * i as f64 / 59.0;
                        let phase = distance / 3000.0 * std::f64::consts::TAU;
                        TelemetrySample {
                            distance,
                            speed: base + 40.0 * (2.0 * phase).sin(),
                            position: Some(contracts::TrackPoint {
                                x: phase.cos(),
                                y: phase.sin(),
                            }),
                            throttle: None,
                            brake: None,
                        }
                    })
                    .collect(),
            )
            .unwrap();
            LapTelemetry {
                driver: driver.into(),
                lap_time: None,
                trace,
            }
        };

        let comparison = engine
            .compare(&with_positions("AAA", 180.0), &with_positions("BBB", 178.0))
            .unwrap();
        let map = comparison.map.unwrap();

        assert_eq!(map.segments.len(), map.grid.len() - 1);
        for (segment, &advantage) in map.segments.iter().zip(&map.speed_advantage) {
            let expected = if advantage > 0.0 { Driver::A } else { Driver::B };
            assert_eq!(segment.faster, expected);
        }
    }

    /// 错误性质：速度 <= 0 报 InvalidSpeed，无部分输出
    #[test]
    fn test_invalid_speed_error_property() {
        let engine = ComparisonEngine::new(five_point_config());
        let lap_a = constant_lap("AAA", 100.0, 4.0, 5);

        // 合法轨迹允许 speed == 0（静止点），但 delta 计算必须拒绝
        let stopped = LapTelemetry {
            driver: "BBB".into(),
            lap_time: None,
            trace: TelemetryTrace::new(
                (0..5)
                    .map(|i| TelemetrySample::speed_only(i as f64, if i == 2 { 0.0 } else { 90.0 }))
                    .collect(),
            )
            .unwrap(),
        };

        let result = engine.compare(&lap_a, &stopped);
        assert!(matches!(result, Err(ContractError::InvalidSpeed { .. })));
    }
}
