//! Analytics Service Integration Tests
//!
//! インメモリバックエンドでのサービス層エンドツーエンドテスト。
//! 検索インデックス障害時のフォールバックも疑似実装で検証する。

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use warehouse_analytics_rs::config::AnalyticsConfig;
use warehouse_analytics_rs::error::{Error, Result};
use warehouse_analytics_rs::model::{
    AlertLevel, MetricCategory, MetricType, NewMetric, PerformanceMetric, ReportFormat,
    ReportRequest, ReportStatus, ReportType, TrendDirection,
};
use warehouse_analytics_rs::service::AnalyticsService;
use warehouse_analytics_rs::storage::{MemoryMetricStore, SearchIndex};

fn service() -> AnalyticsService {
    AnalyticsService::in_memory(AnalyticsConfig::default())
}

fn draft(
    warehouse_id: Uuid,
    metric_type: MetricType,
    category: MetricCategory,
    value: f64,
) -> NewMetric {
    NewMetric::new(warehouse_id, metric_type, category, value)
}

/// 常に失敗する検索インデックス（障害注入用）
struct FailingSearchIndex;

#[async_trait]
impl SearchIndex for FailingSearchIndex {
    async fn index(&self, _metric: &PerformanceMetric) -> Result<()> {
        Err(Error::SearchIndex("index unavailable".to_string()))
    }

    async fn search(&self, _text: &str) -> Result<Vec<PerformanceMetric>> {
        Err(Error::SearchIndex("index unavailable".to_string()))
    }

    async fn delete(&self, _id: Uuid) -> Result<bool> {
        Err(Error::SearchIndex("index unavailable".to_string()))
    }

    async fn clear(&self) -> Result<()> {
        Err(Error::SearchIndex("index unavailable".to_string()))
    }
}

#[tokio::test]
async fn test_record_and_read_round_trip() {
    let service = service();
    let warehouse_id = Uuid::new_v4();

    let recorded = service
        .record_metric(
            draft(
                warehouse_id,
                MetricType::Efficiency,
                MetricCategory::Operations,
                85.0,
            )
            .with_description("picking line efficiency"),
            "operator",
        )
        .await
        .expect("record");

    let fetched = service.get_metric(recorded.id).await.expect("get");
    assert_eq!(fetched.id, recorded.id);
    assert_eq!(fetched.warehouse_id, warehouse_id);
    assert_eq!(fetched.value, 85.0);
    // 85 * 0.3 = 25.5、値85は閾値帯 [70, 90) でLow
    assert_eq!(fetched.performance_score, 25.5);
    assert_eq!(fetched.alert_level, AlertLevel::Low);
    assert!(fetched.is_alert);
    assert!(fetched.is_active);
}

#[tokio::test]
async fn test_alert_threshold_table_via_service() {
    let service = service();
    let warehouse_id = Uuid::new_v4();
    let expectations = [
        (95.0, AlertLevel::Info),
        (75.0, AlertLevel::Low),
        (55.0, AlertLevel::Medium),
        (35.0, AlertLevel::High),
        (15.0, AlertLevel::Critical),
    ];

    for (value, expected) in expectations {
        let metric = service
            .record_metric(
                draft(
                    warehouse_id,
                    MetricType::Efficiency,
                    MetricCategory::Operations,
                    value,
                ),
                "operator",
            )
            .await
            .expect("record");
        assert_eq!(metric.alert_level, expected, "value {}", value);
    }

    // Infoの1件だけがアラートにならない
    let alerts = service.active_alerts().await.expect("alerts");
    assert_eq!(alerts.len(), 4);

    let critical = service
        .alerts_by_severity(AlertLevel::Critical)
        .await
        .expect("by severity");
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0].value, 15.0);
}

#[tokio::test]
async fn test_search_falls_back_to_store_on_index_failure() {
    let config = AnalyticsConfig::default();
    let store = Arc::new(MemoryMetricStore::new());
    let service = AnalyticsService::new(store, Arc::new(FailingSearchIndex), config);

    // インデックス登録は失敗するが記録自体は成功する
    let recorded = service
        .record_metric(
            draft(
                Uuid::new_v4(),
                MetricType::OrderAccuracy,
                MetricCategory::Quality,
                98.0,
            )
            .with_description("outbound dock audit"),
            "operator",
        )
        .await
        .expect("record survives index failure");

    // 検索はストアのテキストフィルタにフォールバック
    let hits = service.search_metrics("dock").await.expect("fallback search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, recorded.id);

    assert!(service.search_metrics("inbound").await.expect("search").is_empty());
}

#[tokio::test]
async fn test_forecast_through_service() {
    let service = service();
    let warehouse_id = Uuid::new_v4();

    // 7点の上昇履歴
    for value in [100.0, 110.0, 120.0, 130.0, 140.0, 150.0, 160.0] {
        service
            .record_metric(
                draft(
                    warehouse_id,
                    MetricType::Throughput,
                    MetricCategory::Operations,
                    value,
                ),
                "operator",
            )
            .await
            .expect("record");
    }

    let forecast = service
        .forecast_metric(warehouse_id, &MetricType::Throughput, 10)
        .await
        .expect("forecast");
    assert_eq!(forecast.len(), 10);
    assert!(forecast[0] > 160.0);
    // 単調増加の外挿
    assert!(forecast.windows(2).all(|w| w[1] >= w[0]));

    let err = service
        .forecast_metric(warehouse_id, &MetricType::Throughput, 91)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn test_correlate_through_service() {
    let service = service();
    let warehouse_id = Uuid::new_v4();

    for i in 1..=5 {
        service
            .record_metric(
                draft(
                    warehouse_id,
                    MetricType::Throughput,
                    MetricCategory::Operations,
                    i as f64 * 10.0,
                ),
                "operator",
            )
            .await
            .expect("record");
        service
            .record_metric(
                draft(
                    warehouse_id,
                    MetricType::EnergyConsumption,
                    MetricCategory::ResourceManagement,
                    i as f64 * 3.0 + 5.0,
                ),
                "operator",
            )
            .await
            .expect("record");
    }

    let correlation = service
        .correlate(
            warehouse_id,
            &MetricType::Throughput,
            &MetricType::EnergyConsumption,
            7,
        )
        .await
        .expect("correlate");
    assert!((correlation - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_kpi_summary_counts() {
    let service = service();
    let warehouse_id = Uuid::new_v4();

    service
        .record_metric(
            draft(
                warehouse_id,
                MetricType::Efficiency,
                MetricCategory::Operations,
                95.0,
            ),
            "operator",
        )
        .await
        .expect("record");
    service
        .record_metric(
            draft(
                warehouse_id,
                MetricType::Quality,
                MetricCategory::Quality,
                45.0,
            ),
            "operator",
        )
        .await
        .expect("record");

    let now = Utc::now();
    let summary = service
        .kpi_summary(warehouse_id, now - Duration::hours(1), now + Duration::seconds(1))
        .await
        .expect("kpi");

    assert_eq!(summary.total_metrics, 2);
    assert_eq!(summary.alert_counts.get(&AlertLevel::Info), Some(&1));
    assert_eq!(summary.alert_counts.get(&AlertLevel::High), Some(&1));
    assert_eq!(summary.category_counts.get(&MetricCategory::Operations), Some(&1));
    assert_eq!(summary.category_counts.get(&MetricCategory::Quality), Some(&1));
    // (28.5 + 11.25) / 2 = 19.875
    assert_eq!(summary.average_performance_score, 19.875);
    assert!(summary.efficiency_score > 0.0);
}

#[tokio::test]
async fn test_dashboard_snapshot_through_service() {
    let service = service();
    let warehouse_id = Uuid::new_v4();

    service
        .record_metric(
            draft(
                warehouse_id,
                MetricType::Throughput,
                MetricCategory::Operations,
                95.0,
            ),
            "operator",
        )
        .await
        .expect("record");
    service
        .record_metric(
            draft(
                warehouse_id,
                MetricType::Cost,
                MetricCategory::Financial,
                20.0,
            ),
            "operator",
        )
        .await
        .expect("record");

    let snapshot = service.dashboard(warehouse_id).await.expect("dashboard");
    assert_eq!(snapshot.warehouse_id, warehouse_id);
    assert_eq!(snapshot.total_metrics, 2);
    assert_eq!(snapshot.active_alerts, 1);
    assert_eq!(snapshot.category_performance.len(), 2);
    assert!(snapshot.efficiency_score > 0.0);

    let financial = &snapshot.category_performance[&MetricCategory::Financial];
    // コスト20は反転スコア: 100 - 20*0.2 = 96
    assert_eq!(financial.average_score, 96.0);
    assert_eq!(financial.alert_count, 1);
}

#[tokio::test]
async fn test_efficiency_score_empty_window_is_zero() {
    let service = service();
    let now = Utc::now();
    let score = service
        .efficiency_score(Uuid::new_v4(), now - Duration::days(7), now)
        .await
        .expect("efficiency");
    assert_eq!(score, 0.0);
}

#[tokio::test]
async fn test_compare_and_distribution() {
    let service = service();
    let fast = Uuid::new_v4();
    let slow = Uuid::new_v4();

    for value in [200.0, 220.0] {
        service
            .record_metric(
                draft(fast, MetricType::Throughput, MetricCategory::Operations, value),
                "operator",
            )
            .await
            .expect("record");
    }
    service
        .record_metric(
            draft(slow, MetricType::Throughput, MetricCategory::Operations, 90.0),
            "operator",
        )
        .await
        .expect("record");
    service
        .record_metric(
            draft(slow, MetricType::Quality, MetricCategory::Quality, 80.0),
            "operator",
        )
        .await
        .expect("record");

    let comparison = service
        .compare_warehouse_performance(&[fast, slow, Uuid::new_v4()], &MetricType::Throughput, 7)
        .await
        .expect("compare");
    // 測定値の無い倉庫は含まれない
    assert_eq!(comparison.len(), 2);
    assert_eq!(comparison[&fast], 210.0);
    assert_eq!(comparison[&slow], 90.0);

    let distribution = service.metric_distribution(slow).await.expect("distribution");
    assert_eq!(distribution[&MetricCategory::Operations], 1);
    assert_eq!(distribution[&MetricCategory::Quality], 1);
}

#[tokio::test]
async fn test_trend_direction_through_service() {
    let service = service();
    let warehouse_id = Uuid::new_v4();

    for value in [100.0, 90.0, 80.0, 70.0, 60.0] {
        service
            .record_metric(
                draft(
                    warehouse_id,
                    MetricType::Throughput,
                    MetricCategory::Operations,
                    value,
                ),
                "operator",
            )
            .await
            .expect("record");
    }

    let direction = service
        .trend_direction(warehouse_id, &MetricType::Throughput, 7)
        .await
        .expect("direction");
    assert_eq!(direction, TrendDirection::StrongDownward);

    // データの無い倉庫はStable
    let direction = service
        .trend_direction(Uuid::new_v4(), &MetricType::Throughput, 7)
        .await
        .expect("direction");
    assert_eq!(direction, TrendDirection::Stable);
}

#[tokio::test]
async fn test_generate_text_report() {
    let service = service();
    let warehouse_id = Uuid::new_v4();

    service
        .record_metric(
            draft(
                warehouse_id,
                MetricType::Throughput,
                MetricCategory::Operations,
                120.0,
            ),
            "operator",
        )
        .await
        .expect("record");

    let now = Utc::now();
    let request = ReportRequest {
        title: "Daily operations".to_string(),
        description: None,
        report_type: ReportType::PerformanceSummary,
        format: ReportFormat::Text,
        warehouse_id,
        metric_type: None,
        period_start: now - Duration::days(1),
        period_end: now + Duration::seconds(1),
    };

    let report = service
        .generate_report(request, "scheduler")
        .await
        .expect("generate");
    assert_eq!(report.status, ReportStatus::Completed);
    assert!(report.completed_at.is_some());

    let text = String::from_utf8(report.content).expect("utf8");
    assert!(text.contains("Analytics Report: Daily operations"));
    assert!(text.contains("Total Metrics: 1"));
}

#[tokio::test]
async fn test_generate_report_rejects_inverted_period() {
    let service = service();
    let now = Utc::now();
    let request = ReportRequest {
        title: "Broken".to_string(),
        description: None,
        report_type: ReportType::RawExport,
        format: ReportFormat::Csv,
        warehouse_id: Uuid::new_v4(),
        metric_type: None,
        period_start: now,
        period_end: now - Duration::days(1),
    };

    let err = service.generate_report(request, "scheduler").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn test_export_csv_round_trip() {
    let service = service();
    let warehouse_id = Uuid::new_v4();

    service
        .record_metric(
            draft(
                warehouse_id,
                MetricType::Throughput,
                MetricCategory::Operations,
                150.0,
            ),
            "operator",
        )
        .await
        .expect("record");

    let now = Utc::now();
    let csv = service
        .export_csv(warehouse_id, now - Duration::hours(1), now + Duration::seconds(1))
        .await
        .expect("export");
    let text = String::from_utf8(csv).expect("utf8");

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("id,warehouse_id,metric_type"));
    assert!(lines[1].contains(&warehouse_id.to_string()));
    assert!(lines[1].contains("150"));
}

#[tokio::test]
async fn test_reindex_rebuilds_from_active_metrics() {
    let service = service();
    let warehouse_id = Uuid::new_v4();

    for value in [80.0, 85.0] {
        service
            .record_metric(
                draft(
                    warehouse_id,
                    MetricType::Efficiency,
                    MetricCategory::Operations,
                    value,
                )
                .with_description("conveyor line"),
                "operator",
            )
            .await
            .expect("record");
    }

    let indexed = service.reindex_search_data().await.expect("reindex");
    assert_eq!(indexed, 2);

    let hits = service.search_metrics("conveyor").await.expect("search");
    assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn test_delete_removes_from_store_and_index() {
    let service = service();
    let metric = service
        .record_metric(
            draft(
                Uuid::new_v4(),
                MetricType::Efficiency,
                MetricCategory::Operations,
                80.0,
            )
            .with_description("staging area"),
            "operator",
        )
        .await
        .expect("record");

    service.delete_metric(metric.id).await.expect("delete");

    let err = service.get_metric(metric.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(service.search_metrics("staging").await.expect("search").is_empty());

    // 既に消えているIDの削除はNotFound
    let err = service.delete_metric(metric.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
