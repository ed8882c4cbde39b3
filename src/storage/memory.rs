//! In-Memory Metric Store
//!
//! RwLock<HashMap>によるメトリクスストア実装。テストと小規模環境用。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::MetricStore;
use crate::error::{Error, Result};
use crate::model::{AlertLevel, MetricCategory, MetricType, PerformanceMetric};

/// インメモリメトリクスストア
#[derive(Debug, Default)]
pub struct MemoryMetricStore {
    metrics: Arc<RwLock<HashMap<Uuid, PerformanceMetric>>>,
}

impl MemoryMetricStore {
    /// 新しいストアを作成
    pub fn new() -> Self {
        Self {
            metrics: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// 述語に一致するメトリクスを recorded_at 昇順で収集
    async fn collect_sorted<F>(&self, predicate: F) -> Vec<PerformanceMetric>
    where
        F: Fn(&PerformanceMetric) -> bool,
    {
        let metrics = self.metrics.read().await;
        let mut result: Vec<PerformanceMetric> =
            metrics.values().filter(|m| predicate(m)).cloned().collect();
        result.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at));
        result
    }
}

#[async_trait]
impl MetricStore for MemoryMetricStore {
    async fn insert(&self, metric: PerformanceMetric) -> Result<PerformanceMetric> {
        let mut metrics = self.metrics.write().await;
        metrics.insert(metric.id, metric.clone());
        Ok(metric)
    }

    async fn get(&self, id: Uuid) -> Result<Option<PerformanceMetric>> {
        let metrics = self.metrics.read().await;
        Ok(metrics.get(&id).cloned())
    }

    async fn update(&self, mut metric: PerformanceMetric) -> Result<PerformanceMetric> {
        let mut metrics = self.metrics.write().await;
        let current = metrics
            .get(&metric.id)
            .ok_or(Error::NotFound(metric.id))?;

        // 楽観ロック: 読み出し時のバージョンと一致しなければ競合
        if current.version != metric.version {
            return Err(Error::Conflict {
                id: metric.id,
                expected: metric.version,
                found: current.version,
            });
        }

        metric.version += 1;
        metrics.insert(metric.id, metric.clone());
        Ok(metric)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut metrics = self.metrics.write().await;
        Ok(metrics.remove(&id).is_some())
    }

    async fn by_warehouse(&self, warehouse_id: Uuid) -> Result<Vec<PerformanceMetric>> {
        Ok(self
            .collect_sorted(|m| m.warehouse_id == warehouse_id)
            .await)
    }

    async fn by_warehouse_type_between(
        &self,
        warehouse_id: Uuid,
        metric_type: &MetricType,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PerformanceMetric>> {
        Ok(self
            .collect_sorted(|m| {
                m.warehouse_id == warehouse_id
                    && &m.metric_type == metric_type
                    && m.recorded_at >= from
                    && m.recorded_at <= to
            })
            .await)
    }

    async fn by_warehouse_between(
        &self,
        warehouse_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PerformanceMetric>> {
        Ok(self
            .collect_sorted(|m| {
                m.warehouse_id == warehouse_id && m.recorded_at >= from && m.recorded_at <= to
            })
            .await)
    }

    async fn by_warehouse_after(
        &self,
        warehouse_id: Uuid,
        after: DateTime<Utc>,
    ) -> Result<Vec<PerformanceMetric>> {
        Ok(self
            .collect_sorted(|m| m.warehouse_id == warehouse_id && m.recorded_at > after)
            .await)
    }

    async fn by_warehouse_category_after(
        &self,
        warehouse_id: Uuid,
        category: MetricCategory,
        after: DateTime<Utc>,
    ) -> Result<Vec<PerformanceMetric>> {
        Ok(self
            .collect_sorted(|m| {
                m.warehouse_id == warehouse_id
                    && m.metric_category == category
                    && m.recorded_at > after
            })
            .await)
    }

    async fn by_type_after(
        &self,
        metric_type: &MetricType,
        after: DateTime<Utc>,
    ) -> Result<Vec<PerformanceMetric>> {
        Ok(self
            .collect_sorted(|m| &m.metric_type == metric_type && m.recorded_at > after)
            .await)
    }

    async fn recorded_after(&self, after: DateTime<Utc>) -> Result<Vec<PerformanceMetric>> {
        Ok(self.collect_sorted(|m| m.recorded_at > after).await)
    }

    async fn recorded_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<PerformanceMetric>> {
        Ok(self.collect_sorted(|m| m.recorded_at < cutoff).await)
    }

    async fn archived_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<PerformanceMetric>> {
        Ok(self
            .collect_sorted(|m| {
                !m.is_active && m.archived_at.map(|at| at < cutoff).unwrap_or(false)
            })
            .await)
    }

    async fn active(&self) -> Result<Vec<PerformanceMetric>> {
        Ok(self.collect_sorted(|m| m.is_active).await)
    }

    async fn active_alerts(&self) -> Result<Vec<PerformanceMetric>> {
        Ok(self.collect_sorted(|m| m.is_alert && m.is_active).await)
    }

    async fn alerts_by_warehouse(&self, warehouse_id: Uuid) -> Result<Vec<PerformanceMetric>> {
        Ok(self
            .collect_sorted(|m| m.warehouse_id == warehouse_id && m.is_alert && m.is_active)
            .await)
    }

    async fn alerts_by_level(&self, level: AlertLevel) -> Result<Vec<PerformanceMetric>> {
        Ok(self
            .collect_sorted(|m| m.alert_level == level && m.is_alert)
            .await)
    }

    async fn search_text(&self, text: &str) -> Result<Vec<PerformanceMetric>> {
        let needle = text.to_lowercase();
        Ok(self
            .collect_sorted(|m| {
                m.metric_type.name().to_lowercase().contains(&needle)
                    || m.description
                        .as_deref()
                        .map(|d| d.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                    || m.tags
                        .values()
                        .any(|v| v.to_lowercase().contains(&needle))
            })
            .await)
    }

    async fn count(&self) -> Result<usize> {
        let metrics = self.metrics.read().await;
        Ok(metrics.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewMetric;

    fn metric(warehouse_id: Uuid, metric_type: MetricType, value: f64) -> PerformanceMetric {
        let draft = NewMetric::new(warehouse_id, metric_type, MetricCategory::Operations, value);
        PerformanceMetric::record(draft, "tester", 0.0, AlertLevel::Info)
    }

    #[tokio::test]
    async fn test_insert_get_delete() {
        let store = MemoryMetricStore::new();
        let warehouse_id = Uuid::new_v4();
        let saved = store
            .insert(metric(warehouse_id, MetricType::Throughput, 120.0))
            .await
            .expect("insert");

        let loaded = store.get(saved.id).await.expect("get");
        assert_eq!(loaded.map(|m| m.value), Some(120.0));

        assert!(store.delete(saved.id).await.expect("delete"));
        assert!(store.get(saved.id).await.expect("get").is_none());
        assert!(!store.delete(saved.id).await.expect("delete twice"));
    }

    #[tokio::test]
    async fn test_update_version_conflict() {
        let store = MemoryMetricStore::new();
        let warehouse_id = Uuid::new_v4();
        let saved = store
            .insert(metric(warehouse_id, MetricType::Throughput, 120.0))
            .await
            .expect("insert");

        let mut first = saved.clone();
        first.value = 130.0;
        let updated = store.update(first).await.expect("first update");
        assert_eq!(updated.version, 1);

        // 古いバージョンでの更新は競合エラー
        let mut stale = saved;
        stale.value = 140.0;
        let err = store.update(stale).await.unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_window_query_sorted_and_filtered() {
        let store = MemoryMetricStore::new();
        let warehouse_id = Uuid::new_v4();
        let other_warehouse = Uuid::new_v4();
        let now = Utc::now();

        for (offset, value) in [(5i64, 10.0), (3, 20.0), (1, 30.0)] {
            let mut m = metric(warehouse_id, MetricType::Throughput, value);
            m.recorded_at = now - chrono::Duration::days(offset);
            store.insert(m).await.expect("insert");
        }
        let mut other = metric(other_warehouse, MetricType::Throughput, 99.0);
        other.recorded_at = now;
        store.insert(other).await.expect("insert");

        let window = store
            .by_warehouse_type_between(
                warehouse_id,
                &MetricType::Throughput,
                now - chrono::Duration::days(7),
                now,
            )
            .await
            .expect("query");

        let values: Vec<f64> = window.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0]);
    }

    #[tokio::test]
    async fn test_search_text_matches_description_and_tags() {
        let store = MemoryMetricStore::new();
        let warehouse_id = Uuid::new_v4();

        let draft = NewMetric::new(
            warehouse_id,
            MetricType::Efficiency,
            MetricCategory::Operations,
            80.0,
        )
        .with_description("Zone A picking line")
        .with_tag("shift", "night");
        store
            .insert(PerformanceMetric::record(draft, "tester", 0.0, AlertLevel::Info))
            .await
            .expect("insert");

        assert_eq!(store.search_text("picking").await.expect("search").len(), 1);
        assert_eq!(store.search_text("NIGHT").await.expect("search").len(), 1);
        assert!(store.search_text("missing").await.expect("search").is_empty());
    }
}
