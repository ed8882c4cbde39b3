//! Dashboard Aggregation
//!
//! 運用ダッシュボード用のスナップショット集計。直近24時間の
//! メトリクスをカテゴリ別に要約し、7日間の効率スコアを添える。

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::analytics::{stats, PerformanceScorer, TrendAnalyzer};
use crate::error::Result;
use crate::model::{MetricCategory, PerformanceMetric, TrendDirection};
use crate::storage::MetricStore;

/// カテゴリ別サマリー
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    /// カテゴリ
    pub category: MetricCategory,
    /// 平均性能スコア
    pub average_score: f64,
    /// メトリクス数
    pub total_metrics: usize,
    /// アクティブアラート数
    pub alert_count: usize,
    /// 測定値のトレンド方向
    pub trend: TrendDirection,
    /// スコア上位5件のメトリクス
    pub top_metrics: Vec<PerformanceMetric>,
}

/// ダッシュボードスナップショット
///
/// 生成時点のウィンドウクエリから毎回computeされる。キャッシュ・
/// 事前集計は持たない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// 対象倉庫ID
    pub warehouse_id: Uuid,
    /// 生成日時
    pub generated_at: DateTime<Utc>,
    /// 直近ウィンドウのメトリクス数
    pub total_metrics: usize,
    /// 倉庫効率スコア（7日ウィンドウ）
    pub efficiency_score: f64,
    /// アクティブアラート数
    pub active_alerts: usize,
    /// カテゴリ別パフォーマンス（測定値のあるカテゴリのみ）
    pub category_performance: HashMap<MetricCategory, CategorySummary>,
}

/// ダッシュボード集計器
pub struct DashboardAggregator {
    store: Arc<dyn MetricStore>,
    scorer: PerformanceScorer,
    trend: TrendAnalyzer,
    recent_hours: i64,
    efficiency_days: i64,
}

impl DashboardAggregator {
    /// 新しい集計器を作成
    pub fn new(
        store: Arc<dyn MetricStore>,
        scorer: PerformanceScorer,
        trend: TrendAnalyzer,
        recent_hours: i64,
        efficiency_days: i64,
    ) -> Self {
        Self {
            store,
            scorer,
            trend,
            recent_hours,
            efficiency_days,
        }
    }

    /// 倉庫のダッシュボードスナップショットを生成
    pub async fn snapshot(&self, warehouse_id: Uuid) -> Result<DashboardSnapshot> {
        let now = Utc::now();
        let recent_since = now - Duration::hours(self.recent_hours);

        let recent = self.store.by_warehouse_after(warehouse_id, recent_since).await?;

        let efficiency_window = self
            .store
            .by_warehouse_between(warehouse_id, now - Duration::days(self.efficiency_days), now)
            .await?;
        let efficiency_score = self.scorer.efficiency_score(&efficiency_window);

        let alerts = self.store.alerts_by_warehouse(warehouse_id).await?;

        let mut category_performance = HashMap::new();
        for category in MetricCategory::ALL {
            let metrics = self
                .store
                .by_warehouse_category_after(warehouse_id, category, recent_since)
                .await?;
            if metrics.is_empty() {
                continue;
            }

            let scores: Vec<f64> = metrics.iter().map(|m| m.performance_score).collect();
            let values: Vec<f64> = metrics.iter().map(|m| m.value).collect();
            let alert_count = metrics.iter().filter(|m| m.is_alert).count();

            let mut top_metrics = metrics.clone();
            top_metrics.sort_by(|a, b| b.performance_score.total_cmp(&a.performance_score));
            top_metrics.truncate(5);

            category_performance.insert(
                category,
                CategorySummary {
                    category,
                    average_score: stats::mean(&scores),
                    total_metrics: metrics.len(),
                    alert_count,
                    trend: self.trend.direction(&values),
                    top_metrics,
                },
            );
        }

        Ok(DashboardSnapshot {
            warehouse_id,
            generated_at: now,
            total_metrics: recent.len(),
            efficiency_score,
            active_alerts: alerts.len(),
            category_performance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AlertLevel, MetricType, NewMetric};
    use crate::storage::MemoryMetricStore;

    fn aggregator(store: Arc<dyn MetricStore>) -> DashboardAggregator {
        DashboardAggregator::new(
            store,
            PerformanceScorer::default(),
            TrendAnalyzer::default(),
            24,
            7,
        )
    }

    async fn seed(
        store: &MemoryMetricStore,
        warehouse_id: Uuid,
        category: MetricCategory,
        value: f64,
        score: f64,
        level: AlertLevel,
    ) -> PerformanceMetric {
        let draft = NewMetric::new(warehouse_id, MetricType::Throughput, category, value);
        let metric = PerformanceMetric::record(draft, "tester", score, level);
        store.insert(metric).await.expect("insert")
    }

    #[tokio::test]
    async fn test_empty_warehouse_snapshot() {
        let store = Arc::new(MemoryMetricStore::new());
        let snapshot = aggregator(store)
            .snapshot(Uuid::new_v4())
            .await
            .expect("snapshot");

        assert_eq!(snapshot.total_metrics, 0);
        assert_eq!(snapshot.efficiency_score, 0.0);
        assert_eq!(snapshot.active_alerts, 0);
        assert!(snapshot.category_performance.is_empty());
    }

    #[tokio::test]
    async fn test_category_summaries() {
        let store = Arc::new(MemoryMetricStore::new());
        let warehouse_id = Uuid::new_v4();

        seed(&store, warehouse_id, MetricCategory::Operations, 100.0, 60.0, AlertLevel::Info).await;
        seed(&store, warehouse_id, MetricCategory::Operations, 110.0, 80.0, AlertLevel::Info).await;
        seed(&store, warehouse_id, MetricCategory::Quality, 40.0, 10.0, AlertLevel::High).await;

        let snapshot = aggregator(store.clone())
            .snapshot(warehouse_id)
            .await
            .expect("snapshot");

        assert_eq!(snapshot.total_metrics, 3);
        assert_eq!(snapshot.active_alerts, 1);
        assert_eq!(snapshot.category_performance.len(), 2);

        let operations = &snapshot.category_performance[&MetricCategory::Operations];
        assert_eq!(operations.total_metrics, 2);
        assert_eq!(operations.average_score, 70.0);
        assert_eq!(operations.alert_count, 0);

        let quality = &snapshot.category_performance[&MetricCategory::Quality];
        assert_eq!(quality.alert_count, 1);
    }

    #[tokio::test]
    async fn test_top_metrics_capped_at_five() {
        let store = Arc::new(MemoryMetricStore::new());
        let warehouse_id = Uuid::new_v4();
        for i in 0..8 {
            seed(
                &store,
                warehouse_id,
                MetricCategory::Operations,
                100.0,
                10.0 * i as f64,
                AlertLevel::Info,
            )
            .await;
        }

        let snapshot = aggregator(store)
            .snapshot(warehouse_id)
            .await
            .expect("snapshot");
        let operations = &snapshot.category_performance[&MetricCategory::Operations];
        assert_eq!(operations.top_metrics.len(), 5);
        // 降順で最良スコアが先頭
        assert_eq!(operations.top_metrics[0].performance_score, 70.0);
        assert_eq!(operations.top_metrics[4].performance_score, 30.0);
    }
}
