//! Metric Storage
//!
//! 外部メトリクスストアと検索インデックスのインターフェース

pub mod memory;
pub mod search;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{AlertLevel, MetricCategory, MetricType, PerformanceMetric};

pub use memory::MemoryMetricStore;
pub use search::{MemorySearchIndex, SearchIndex};

/// 永続メトリクスストア
///
/// 時間ウィンドウ系のクエリは recorded_at 昇順で返すこと。回帰・予測は
/// 時系列順に依存する。更新は楽観ロック（バージョン照合）で
/// 失われた更新を防ぐ。
#[async_trait]
pub trait MetricStore: Send + Sync {
    /// メトリクスを保存
    async fn insert(&self, metric: PerformanceMetric) -> Result<PerformanceMetric>;

    /// IDでメトリクスを取得
    async fn get(&self, id: Uuid) -> Result<Option<PerformanceMetric>>;

    /// メトリクスを更新（バージョン照合、保存時にインクリメント）
    async fn update(&self, metric: PerformanceMetric) -> Result<PerformanceMetric>;

    /// メトリクスを完全削除
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// 倉庫の全メトリクス
    async fn by_warehouse(&self, warehouse_id: Uuid) -> Result<Vec<PerformanceMetric>>;

    /// 倉庫・種類・期間でのウィンドウクエリ
    async fn by_warehouse_type_between(
        &self,
        warehouse_id: Uuid,
        metric_type: &MetricType,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PerformanceMetric>>;

    /// 倉庫・期間でのウィンドウクエリ
    async fn by_warehouse_between(
        &self,
        warehouse_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PerformanceMetric>>;

    /// 倉庫の指定時刻以降のメトリクス
    async fn by_warehouse_after(
        &self,
        warehouse_id: Uuid,
        after: DateTime<Utc>,
    ) -> Result<Vec<PerformanceMetric>>;

    /// 倉庫・カテゴリの指定時刻以降のメトリクス
    async fn by_warehouse_category_after(
        &self,
        warehouse_id: Uuid,
        category: MetricCategory,
        after: DateTime<Utc>,
    ) -> Result<Vec<PerformanceMetric>>;

    /// 種類の指定時刻以降のメトリクス（全倉庫）
    async fn by_type_after(
        &self,
        metric_type: &MetricType,
        after: DateTime<Utc>,
    ) -> Result<Vec<PerformanceMetric>>;

    /// 指定時刻以降の全メトリクス
    async fn recorded_after(&self, after: DateTime<Utc>) -> Result<Vec<PerformanceMetric>>;

    /// 指定時刻より前に記録された全メトリクス
    async fn recorded_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<PerformanceMetric>>;

    /// 指定時刻より前にアーカイブされたメトリクス
    async fn archived_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<PerformanceMetric>>;

    /// 全アクティブメトリクス
    async fn active(&self) -> Result<Vec<PerformanceMetric>>;

    /// アクティブアラート（is_alert && is_active）
    async fn active_alerts(&self) -> Result<Vec<PerformanceMetric>>;

    /// 倉庫のアクティブアラート
    async fn alerts_by_warehouse(&self, warehouse_id: Uuid) -> Result<Vec<PerformanceMetric>>;

    /// 重大度別のアクティブアラート
    async fn alerts_by_level(&self, level: AlertLevel) -> Result<Vec<PerformanceMetric>>;

    /// フリーテキスト検索（説明・メトリクス名・タグの部分一致）
    ///
    /// 検索インデックス障害時のフォールバック経路。
    async fn search_text(&self, text: &str) -> Result<Vec<PerformanceMetric>>;

    /// 総レコード数
    async fn count(&self) -> Result<usize>;
}
