//! Analytics Service
//!
//! 統計コンポーネントとストレージを束ねるオーケストレーション層。
//! 派生値（スコア・アラート・トレンド）はすべて保存済みシーケンスから
//! 毎回再計算する。集計結果のキャッシュは持たない。

pub mod dashboard;
pub mod report;

use chrono::{DateTime, Datelike, Duration, Months, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use uuid::Uuid;

use crate::analytics::{
    stats, AlertEngine, AnomalyDetector, CorrelationEngine, ForecastEngine, PerformanceScorer,
    SeriesStats, TrendAnalysisResult, TrendAnalyzer,
};
use crate::config::AnalyticsConfig;
use crate::error::{Error, Result};
use crate::export;
use crate::model::{
    AlertLevel, AnalyticsReport, MeasurementPeriod, MetricCategory, MetricType, NewMetric,
    PerformanceMetric, ReportRequest, TrendDirection,
};
use crate::storage::{MemoryMetricStore, MemorySearchIndex, MetricStore, SearchIndex};

pub use dashboard::{CategorySummary, DashboardAggregator, DashboardSnapshot};
pub use report::ReportGenerator;

/// 一括取り込みの失敗レコード
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkImportFailure {
    /// 入力リスト内の位置
    pub index: usize,
    /// エラーメッセージ
    pub message: String,
}

/// 一括取り込みの結果
///
/// 部分成功を許容する。失敗したレコードは理由付きで報告され、
/// 成功分はロールバックされない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkImportOutcome {
    /// 取り込み成功数
    pub imported: usize,
    /// 失敗レコード
    pub failures: Vec<BulkImportFailure>,
}

/// KPIサマリー
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiSummary {
    /// 対象倉庫ID
    pub warehouse_id: Uuid,
    /// 期間の開始
    pub period_start: DateTime<Utc>,
    /// 期間の終了
    pub period_end: DateTime<Utc>,
    /// 期間内のメトリクス数
    pub total_metrics: usize,
    /// 平均性能スコア
    pub average_performance_score: f64,
    /// 倉庫効率スコア
    pub efficiency_score: f64,
    /// アラートレベル別件数
    pub alert_counts: HashMap<AlertLevel, usize>,
    /// カテゴリ別件数
    pub category_counts: HashMap<MetricCategory, usize>,
}

/// ストレージ統計
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageStatistics {
    /// 総レコード数
    pub total_metrics: usize,
    /// アクティブレコード数
    pub active_metrics: usize,
    /// アーカイブ済みレコード数
    pub archived_metrics: usize,
    /// アクティブアラート数
    pub alert_metrics: usize,
    /// 推定ストレージサイズ（1レコード約1KBの概算）
    pub estimated_size_bytes: u64,
}

/// 倉庫分析サービス
pub struct AnalyticsService {
    store: Arc<dyn MetricStore>,
    search: Arc<dyn SearchIndex>,
    scorer: PerformanceScorer,
    trend: TrendAnalyzer,
    anomaly: AnomalyDetector,
    correlation: CorrelationEngine,
    forecast: ForecastEngine,
    alerts: AlertEngine,
    dashboard: DashboardAggregator,
    reports: ReportGenerator,
    config: AnalyticsConfig,
}

impl AnalyticsService {
    /// 新しいサービスを作成
    pub fn new(
        store: Arc<dyn MetricStore>,
        search: Arc<dyn SearchIndex>,
        config: AnalyticsConfig,
    ) -> Self {
        let scorer = PerformanceScorer::new(config.weights.clone());
        let trend = TrendAnalyzer::new(config.trend.clone());
        let dashboard = DashboardAggregator::new(
            store.clone(),
            scorer.clone(),
            trend.clone(),
            config.dashboard_recent_hours,
            config.dashboard_efficiency_days,
        );
        Self {
            anomaly: AnomalyDetector::new(config.anomaly_threshold, config.anomaly_min_samples),
            correlation: CorrelationEngine::new(config.correlation_min_samples),
            forecast: ForecastEngine::new(
                config.forecast_max_horizon_days,
                config.forecast_min_samples,
            ),
            alerts: AlertEngine::new(config.alert.clone()),
            reports: ReportGenerator::new(),
            store,
            search,
            scorer,
            trend,
            dashboard,
            config,
        }
    }

    /// インメモリバックエンドで構築（テスト・単体稼働用）
    pub fn in_memory(config: AnalyticsConfig) -> Self {
        Self::new(
            Arc::new(MemoryMetricStore::new()),
            Arc::new(MemorySearchIndex::new()),
            config,
        )
    }

    // ========== メトリクスCRUD ==========

    /// メトリクスを記録
    ///
    /// スコアとアラートレベルを算出してから保存する。検索インデックス
    /// への登録はベストエフォートで、失敗しても記録自体は成功する。
    pub async fn record_metric(
        &self,
        draft: NewMetric,
        recorded_by: &str,
    ) -> Result<PerformanceMetric> {
        if !draft.value.is_finite() {
            return Err(Error::Validation("metric value must be finite".to_string()));
        }

        let score = self.scorer.score(draft.metric_category, draft.value);
        let level = self.alerts.level_for(draft.value);
        let metric = PerformanceMetric::record(draft, recorded_by, score, level);

        let stored = self.store.insert(metric).await?;
        tracing::info!(
            metric_id = %stored.id,
            warehouse_id = %stored.warehouse_id,
            metric_type = stored.metric_type.name(),
            value = stored.value,
            alert_level = stored.alert_level.name(),
            "metric recorded"
        );

        if let Err(e) = self.search.index(&stored).await {
            tracing::warn!(metric_id = %stored.id, error = %e, "failed to index metric");
        }
        Ok(stored)
    }

    /// IDでメトリクスを取得
    pub async fn get_metric(&self, id: Uuid) -> Result<PerformanceMetric> {
        self.store.get(id).await?.ok_or(Error::NotFound(id))
    }

    /// 測定値を更新
    ///
    /// 派生フィールドを再計算してから楽観ロック付きで保存する。
    pub async fn update_metric_value(
        &self,
        id: Uuid,
        new_value: f64,
        updated_by: &str,
    ) -> Result<PerformanceMetric> {
        if !new_value.is_finite() {
            return Err(Error::Validation("metric value must be finite".to_string()));
        }

        let mut metric = self.get_metric(id).await?;
        metric.value = new_value;
        metric.performance_score = self.scorer.score(metric.metric_category, new_value);
        self.alerts.apply(&mut metric);
        metric.last_updated_by = Some(updated_by.to_string());
        metric.last_updated_at = Some(Utc::now());

        let stored = self.store.update(metric).await?;
        if let Err(e) = self.search.index(&stored).await {
            tracing::warn!(metric_id = %stored.id, error = %e, "failed to reindex metric");
        }
        Ok(stored)
    }

    /// メトリクスを完全削除
    pub async fn delete_metric(&self, id: Uuid) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(Error::NotFound(id));
        }
        if let Err(e) = self.search.delete(id).await {
            tracing::warn!(metric_id = %id, error = %e, "failed to remove metric from index");
        }
        Ok(())
    }

    /// メトリクスを一括取り込み
    ///
    /// レコード間に依存が無いため並行に記録する。部分成功を返し、
    /// 失敗分は位置と理由を保持する。
    pub async fn bulk_import(
        &self,
        drafts: Vec<NewMetric>,
        imported_by: &str,
    ) -> Result<BulkImportOutcome> {
        let results = futures::future::join_all(
            drafts
                .into_iter()
                .enumerate()
                .map(|(index, draft)| async move {
                    (index, self.record_metric(draft, imported_by).await)
                }),
        )
        .await;

        let mut imported = 0;
        let mut failures = Vec::new();
        for (index, result) in results {
            match result {
                Ok(_) => imported += 1,
                Err(e) => failures.push(BulkImportFailure {
                    index,
                    message: e.to_string(),
                }),
            }
        }

        tracing::info!(imported, failed = failures.len(), "bulk import finished");
        Ok(BulkImportOutcome { imported, failures })
    }

    // ========== 統計分析 ==========

    /// 期間内のトレンドを分析
    pub async fn analyze_trend(
        &self,
        warehouse_id: Uuid,
        metric_type: &MetricType,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<TrendAnalysisResult> {
        if from > to {
            return Err(Error::Validation(
                "period start must not be after period end".to_string(),
            ));
        }

        let metrics = self
            .store
            .by_warehouse_type_between(warehouse_id, metric_type, from, to)
            .await?;
        if metrics.is_empty() {
            return Ok(TrendAnalysisResult::empty(
                warehouse_id,
                metric_type.clone(),
                from,
                to,
            ));
        }

        let values: Vec<f64> = metrics.iter().map(|m| m.value).collect();
        let series = SeriesStats::from_values(&values);
        let slope = self.trend.slope(&values);
        let overall_trend = self.trend.direction(&values);

        let first = values[0];
        let last = values[values.len() - 1];
        let change_percentage = if first != 0.0 {
            Some(stats::round_half_up(
                (last - first) / first * 100.0,
                stats::ROUND_SCALE,
            ))
        } else {
            None
        };

        // 必須フィールドは型で保証されるため、非空なら品質は満点
        let data_quality_score = 100.0;
        let completeness_score = completeness(values.len(), from, to);

        let mut result = TrendAnalysisResult {
            warehouse_id,
            metric_type: metric_type.clone(),
            period_start: from,
            period_end: to,
            average: series.mean,
            std_dev: series.std_dev,
            variance: series.variance,
            minimum: series.min,
            maximum: series.max,
            median: series.median,
            trend_slope: slope,
            overall_trend,
            change_percentage,
            data_point_count: values.len(),
            data_quality_score,
            completeness_score,
            insights: Vec::new(),
            recommendations: Vec::new(),
            performance_grade: grade_for_average(series.mean),
        };
        result.insights = build_insights(&result);
        result.recommendations = build_recommendations(&result);
        tracing::debug!(
            warehouse_id = %warehouse_id,
            metric_type = metric_type.name(),
            trend = result.overall_trend.name(),
            data_points = result.data_point_count,
            "trend analysis finished"
        );
        Ok(result)
    }

    /// 直近ウィンドウのトレンド方向
    pub async fn trend_direction(
        &self,
        warehouse_id: Uuid,
        metric_type: &MetricType,
        days: i64,
    ) -> Result<TrendDirection> {
        let values = self.recent_values(warehouse_id, metric_type, days).await?;
        Ok(self.trend.direction(&values))
    }

    /// 直近ウィンドウの異常値を検出
    pub async fn detect_anomalies(
        &self,
        warehouse_id: Uuid,
        metric_type: &MetricType,
        days: i64,
    ) -> Result<Vec<PerformanceMetric>> {
        let now = Utc::now();
        let metrics = self
            .store
            .by_warehouse_type_between(warehouse_id, metric_type, now - Duration::days(days), now)
            .await?;
        Ok(self.anomaly.detect(&metrics))
    }

    /// 2種類のメトリクス間のピアソン相関係数
    pub async fn correlate(
        &self,
        warehouse_id: Uuid,
        type_a: &MetricType,
        type_b: &MetricType,
        days: i64,
    ) -> Result<f64> {
        let xs = self.recent_values(warehouse_id, type_a, days).await?;
        let ys = self.recent_values(warehouse_id, type_b, days).await?;
        Ok(self.correlation.pearson(&xs, &ys))
    }

    /// 線形外挿による将来値の予測
    ///
    /// 履歴の参照範囲は予測期間の3倍、最大180日。
    pub async fn forecast_metric(
        &self,
        warehouse_id: Uuid,
        metric_type: &MetricType,
        horizon_days: u32,
    ) -> Result<Vec<f64>> {
        self.forecast.check_horizon(horizon_days)?;

        let lookback_days = (horizon_days as i64 * 3).min(180);
        let values = self
            .recent_values(warehouse_id, metric_type, lookback_days)
            .await?;
        self.forecast.forecast(&values, horizon_days)
    }

    /// 直近ウィンドウの記述統計
    ///
    /// 測定値が無ければNone。
    pub async fn calculate_statistics(
        &self,
        warehouse_id: Uuid,
        metric_type: &MetricType,
        days: i64,
    ) -> Result<Option<SeriesStats>> {
        let values = self.recent_values(warehouse_id, metric_type, days).await?;
        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(SeriesStats::from_values(&values)))
    }

    /// 倉庫効率スコア
    pub async fn efficiency_score(
        &self,
        warehouse_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<f64> {
        let metrics = self.store.by_warehouse_between(warehouse_id, from, to).await?;
        Ok(self.scorer.efficiency_score(&metrics))
    }

    // ========== ダッシュボード・集計 ==========

    /// ダッシュボードスナップショットを生成
    pub async fn dashboard(&self, warehouse_id: Uuid) -> Result<DashboardSnapshot> {
        self.dashboard.snapshot(warehouse_id).await
    }

    /// 直近1時間のメトリクス
    pub async fn real_time_metrics(&self, warehouse_id: Uuid) -> Result<Vec<PerformanceMetric>> {
        let since = Utc::now() - Duration::minutes(self.config.realtime_window_minutes);
        self.store.by_warehouse_after(warehouse_id, since).await
    }

    /// 期間内のKPIサマリー
    pub async fn kpi_summary(
        &self,
        warehouse_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<KpiSummary> {
        let metrics = self.store.by_warehouse_between(warehouse_id, from, to).await?;

        let scores: Vec<f64> = metrics.iter().map(|m| m.performance_score).collect();
        let mut alert_counts: HashMap<AlertLevel, usize> = HashMap::new();
        let mut category_counts: HashMap<MetricCategory, usize> = HashMap::new();
        for metric in &metrics {
            *alert_counts.entry(metric.alert_level).or_insert(0) += 1;
            *category_counts.entry(metric.metric_category).or_insert(0) += 1;
        }

        Ok(KpiSummary {
            warehouse_id,
            period_start: from,
            period_end: to,
            total_metrics: metrics.len(),
            average_performance_score: stats::mean(&scores),
            efficiency_score: self.scorer.efficiency_score(&metrics),
            alert_counts,
            category_counts,
        })
    }

    /// フリーテキスト検索
    ///
    /// 検索インデックス障害時は警告を出してストアのテキストフィルタに
    /// フォールバックする。検索の劣化は許容し、失敗にはしない。
    pub async fn search_metrics(&self, text: &str) -> Result<Vec<PerformanceMetric>> {
        match self.search.search(text).await {
            Ok(hits) => Ok(hits),
            Err(e) => {
                tracing::warn!(error = %e, "search index unavailable, falling back to store");
                self.store.search_text(text).await
            }
        }
    }

    /// 複数倉庫の平均測定値を比較
    ///
    /// ウィンドウ内に測定値が無い倉庫は結果に含めない。
    pub async fn compare_warehouse_performance(
        &self,
        warehouse_ids: &[Uuid],
        metric_type: &MetricType,
        days: i64,
    ) -> Result<HashMap<Uuid, f64>> {
        let mut performance = HashMap::new();
        for &warehouse_id in warehouse_ids {
            let values = self.recent_values(warehouse_id, metric_type, days).await?;
            if !values.is_empty() {
                performance.insert(warehouse_id, stats::mean(&values));
            }
        }
        Ok(performance)
    }

    /// 平均性能スコア上位の倉庫
    pub async fn top_performing_warehouses(
        &self,
        metric_type: &MetricType,
        days: i64,
        limit: usize,
    ) -> Result<Vec<Uuid>> {
        let since = Utc::now() - Duration::days(days);
        let metrics = self.store.by_type_after(metric_type, since).await?;

        let mut grouped: HashMap<Uuid, Vec<f64>> = HashMap::new();
        for metric in &metrics {
            grouped
                .entry(metric.warehouse_id)
                .or_default()
                .push(metric.performance_score);
        }

        let mut ranked: Vec<(Uuid, f64)> = grouped
            .into_iter()
            .map(|(warehouse_id, scores)| (warehouse_id, stats::mean(&scores)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(limit);
        Ok(ranked.into_iter().map(|(warehouse_id, _)| warehouse_id).collect())
    }

    /// カテゴリ別メトリクス件数
    pub async fn metric_distribution(
        &self,
        warehouse_id: Uuid,
    ) -> Result<HashMap<MetricCategory, usize>> {
        let metrics = self.store.by_warehouse(warehouse_id).await?;
        let mut distribution = HashMap::new();
        for metric in &metrics {
            *distribution.entry(metric.metric_category).or_insert(0) += 1;
        }
        Ok(distribution)
    }

    /// 測定周期単位にバケット化した平均値系列
    ///
    /// キーはバケット開始時刻。BTreeMapのため時系列順に走査できる。
    pub async fn performance_trends(
        &self,
        warehouse_id: Uuid,
        metric_type: &MetricType,
        period: MeasurementPeriod,
        period_count: u32,
    ) -> Result<BTreeMap<DateTime<Utc>, f64>> {
        let now = Utc::now();
        let from = start_for_period(now, period, period_count);
        let metrics = self
            .store
            .by_warehouse_type_between(warehouse_id, metric_type, from, now)
            .await?;

        let mut buckets: BTreeMap<DateTime<Utc>, Vec<f64>> = BTreeMap::new();
        for metric in &metrics {
            buckets
                .entry(truncate_to_period(metric.recorded_at, period))
                .or_default()
                .push(metric.value);
        }

        Ok(buckets
            .into_iter()
            .map(|(bucket, values)| (bucket, stats::mean(&values)))
            .collect())
    }

    // ========== アラート管理 ==========

    /// 直近に記録されたメトリクスのアラートを再評価
    ///
    /// 確認済みのアラートも現在値が閾値を下回っていれば再フラグする。
    /// アラート状態はデータから常に再導出されるという方針による。
    pub async fn process_metric_alerts(&self) -> Result<usize> {
        let since = Utc::now() - Duration::hours(self.config.alert_sweep_hours);
        let recent = self.store.recorded_after(since).await?;

        let mut flagged = 0;
        for mut metric in recent {
            let level = self.alerts.level_for(metric.value);
            if self.alerts.is_alert(level) {
                self.alerts.apply(&mut metric);
                let stored = self.store.update(metric).await?;
                tracing::warn!(
                    metric_id = %stored.id,
                    warehouse_id = %stored.warehouse_id,
                    metric_type = stored.metric_type.name(),
                    alert_level = stored.alert_level.name(),
                    "alert detected"
                );
                flagged += 1;
            }
        }
        Ok(flagged)
    }

    /// 全アクティブアラート
    pub async fn active_alerts(&self) -> Result<Vec<PerformanceMetric>> {
        self.store.active_alerts().await
    }

    /// 重大度別のアクティブアラート
    pub async fn alerts_by_severity(&self, level: AlertLevel) -> Result<Vec<PerformanceMetric>> {
        self.store.alerts_by_level(level).await
    }

    /// アラートを確認済みにする
    pub async fn acknowledge_alert(
        &self,
        id: Uuid,
        acknowledged_by: &str,
    ) -> Result<PerformanceMetric> {
        let mut metric = self.get_metric(id).await?;
        self.alerts.acknowledge(&mut metric, acknowledged_by, Utc::now());
        let stored = self.store.update(metric).await?;
        tracing::info!(metric_id = %id, acknowledged_by, "alert acknowledged");
        Ok(stored)
    }

    // ========== データ管理 ==========

    /// 古いメトリクスをアーカイブ（ソフト削除）
    ///
    /// アーカイブ済みのレコードは二重処理しない。
    pub async fn archive_old_metrics(&self, days_old: i64) -> Result<usize> {
        let cutoff = Utc::now() - Duration::days(days_old);
        let old_metrics = self.store.recorded_before(cutoff).await?;

        let mut archived = 0;
        for mut metric in old_metrics {
            if !metric.is_active {
                continue;
            }
            metric.is_active = false;
            metric.archived_at = Some(Utc::now());
            self.store.update(metric).await?;
            archived += 1;
        }

        tracing::info!(archived, days_old, "archived old metrics");
        Ok(archived)
    }

    /// 長期アーカイブ済みデータを完全削除
    ///
    /// ストア削除後、検索インデックスからもベストエフォートで消す。
    pub async fn cleanup_expired_data(&self, archived_days: i64) -> Result<usize> {
        let cutoff = Utc::now() - Duration::days(archived_days);
        let expired = self.store.archived_before(cutoff).await?;

        let mut removed = 0;
        for metric in expired {
            if self.store.delete(metric.id).await? {
                removed += 1;
            }
            if let Err(e) = self.search.delete(metric.id).await {
                tracing::warn!(metric_id = %metric.id, error = %e, "failed to cleanup index entry");
            }
        }

        tracing::info!(removed, "cleaned up expired metrics");
        Ok(removed)
    }

    /// 検索インデックスを全アクティブメトリクスから再構築
    pub async fn reindex_search_data(&self) -> Result<usize> {
        tracing::info!("starting search reindex");
        self.search.clear().await?;

        let active = self.store.active().await?;
        for metric in &active {
            self.search.index(metric).await?;
        }

        tracing::info!(indexed = active.len(), "search reindex finished");
        Ok(active.len())
    }

    /// ストレージ統計を取得
    pub async fn storage_statistics(&self) -> Result<StorageStatistics> {
        let total = self.store.count().await?;
        let active = self.store.active().await?.len();
        let alerts = self.store.active_alerts().await?.len();

        Ok(StorageStatistics {
            total_metrics: total,
            active_metrics: active,
            archived_metrics: total - active,
            alert_metrics: alerts,
            estimated_size_bytes: total as u64 * 1024,
        })
    }

    // ========== レポート ==========

    /// 分析レポートを生成
    ///
    /// レンダリング失敗はエラーにせず、Failed状態のレポートとして返す。
    pub async fn generate_report(
        &self,
        request: ReportRequest,
        generated_by: &str,
    ) -> Result<AnalyticsReport> {
        if request.period_start > request.period_end {
            return Err(Error::Validation(
                "report period start must not be after period end".to_string(),
            ));
        }

        tracing::info!(title = %request.title, generated_by, "generating analytics report");
        let mut report = AnalyticsReport::start(&request, generated_by);

        let metrics = self
            .store
            .by_warehouse_between(request.warehouse_id, request.period_start, request.period_end)
            .await?;

        match self.reports.render(&request, &metrics) {
            Ok(content) => {
                report.complete(content);
                tracing::info!(report_id = %report.id, "report generated");
            }
            Err(e) => {
                tracing::error!(report_id = %report.id, error = %e, "report generation failed");
                report.fail(e.to_string());
            }
        }
        Ok(report)
    }

    /// 期間内メトリクスをCSVにエクスポート
    pub async fn export_csv(
        &self,
        warehouse_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<u8>> {
        let metrics = self.store.by_warehouse_between(warehouse_id, from, to).await?;
        export::to_csv(&metrics).map(String::into_bytes)
    }

    // ========== 内部ヘルパー ==========

    async fn recent_values(
        &self,
        warehouse_id: Uuid,
        metric_type: &MetricType,
        days: i64,
    ) -> Result<Vec<f64>> {
        let now = Utc::now();
        let metrics = self
            .store
            .by_warehouse_type_between(warehouse_id, metric_type, now - Duration::days(days), now)
            .await?;
        Ok(metrics.iter().map(|m| m.value).collect())
    }
}

/// データ完全性スコア
///
/// 1日1点を期待値として実データ点数の割合を計算し、100でキャップ。
fn completeness(count: usize, from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let expected = (to - from).num_days().max(1) as f64;
    stats::round_half_up((count as f64 / expected * 100.0).min(100.0), stats::ROUND_SCALE)
}

/// 平均測定値からの性能グレード
fn grade_for_average(average: f64) -> char {
    if average >= 90.0 {
        'A'
    } else if average >= 80.0 {
        'B'
    } else if average >= 70.0 {
        'C'
    } else if average >= 60.0 {
        'D'
    } else {
        'F'
    }
}

fn build_insights(result: &TrendAnalysisResult) -> Vec<String> {
    let mut insights = Vec::new();

    match result.overall_trend {
        TrendDirection::StrongUpward => insights.push(
            "Strong positive trend detected - performance is improving significantly".to_string(),
        ),
        TrendDirection::StrongDownward => insights
            .push("Strong negative trend detected - immediate attention required".to_string()),
        _ => {}
    }

    if result.average > 0.0 {
        let coefficient_of_variation = result.std_dev / result.average;
        if coefficient_of_variation > 0.3 {
            insights.push(
                "High variability detected - consider investigating causes of inconsistency"
                    .to_string(),
            );
        }
    }

    if result.data_point_count < 10 {
        insights.push(
            "Limited data available - consider increasing measurement frequency for better insights"
                .to_string(),
        );
    }

    insights
}

fn build_recommendations(result: &TrendAnalysisResult) -> Vec<String> {
    let mut recommendations = Vec::new();

    if result.overall_trend == TrendDirection::StrongDownward {
        recommendations.push(
            "Implement immediate corrective actions to address declining performance".to_string(),
        );
        recommendations
            .push("Review operational procedures and identify potential bottlenecks".to_string());
    }

    if result.data_quality_score < 80.0 {
        recommendations
            .push("Improve data collection processes to enhance data quality".to_string());
    }

    if result.completeness_score < 70.0 {
        recommendations
            .push("Increase measurement frequency to improve data completeness".to_string());
    }

    recommendations
}

/// ウィンドウ開始時刻を周期×個数分さかのぼる
fn start_for_period(
    end: DateTime<Utc>,
    period: MeasurementPeriod,
    period_count: u32,
) -> DateTime<Utc> {
    match period {
        MeasurementPeriod::RealTime => end - Duration::minutes(period_count as i64),
        MeasurementPeriod::Hourly => end - Duration::hours(period_count as i64),
        MeasurementPeriod::Daily => end - Duration::days(period_count as i64),
        MeasurementPeriod::Weekly => end - Duration::weeks(period_count as i64),
        MeasurementPeriod::Monthly => end - Months::new(period_count),
        MeasurementPeriod::Quarterly => end - Months::new(period_count * 3),
        MeasurementPeriod::Yearly => end - Months::new(period_count * 12),
    }
}

/// 記録時刻を測定周期のバケット開始時刻に切り詰める
fn truncate_to_period(at: DateTime<Utc>, period: MeasurementPeriod) -> DateTime<Utc> {
    let day = at.date_naive();
    match period {
        MeasurementPeriod::Hourly => {
            let ts = at.timestamp();
            DateTime::from_timestamp(ts - ts.rem_euclid(3600), 0).unwrap_or(at)
        }
        MeasurementPeriod::Weekly => {
            let monday = day - Duration::days(day.weekday().num_days_from_monday() as i64);
            monday.and_time(NaiveTime::MIN).and_utc()
        }
        MeasurementPeriod::Monthly => day
            .with_day(1)
            .unwrap_or(day)
            .and_time(NaiveTime::MIN)
            .and_utc(),
        MeasurementPeriod::Quarterly => {
            let quarter_month = (at.month() - 1) / 3 * 3 + 1;
            day.with_day(1)
                .and_then(|d| d.with_month(quarter_month))
                .unwrap_or(day)
                .and_time(NaiveTime::MIN)
                .and_utc()
        }
        MeasurementPeriod::Yearly => day
            .with_ordinal(1)
            .unwrap_or(day)
            .and_time(NaiveTime::MIN)
            .and_utc(),
        // リアルタイムと日次は日単位のバケット
        MeasurementPeriod::RealTime | MeasurementPeriod::Daily => {
            day.and_time(NaiveTime::MIN).and_utc()
        }
    }
}
