//! Trend Analysis
//!
//! 線形回帰によるトレンド検出

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{MetricType, TrendDirection};

/// トレンド分類の閾値
///
/// 固定値だがテストから差し替えられるよう設定構造体として持つ。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendThresholds {
    /// これを超えると強い上昇
    pub strong_upward: f64,
    /// これを超えると上昇
    pub upward: f64,
    /// これを下回ると下降
    pub downward: f64,
    /// これを下回ると強い下降
    pub strong_downward: f64,
}

impl Default for TrendThresholds {
    fn default() -> Self {
        Self {
            strong_upward: 0.05,
            upward: 0.01,
            downward: -0.01,
            strong_downward: -0.05,
        }
    }
}

/// 最小二乗法による回帰直線の傾き
///
/// x は0始まりのサンプル位置。時間間隔の不均一さは考慮しない
/// （意図的な単純化。間隔が不揃いなサンプルでは傾きに偏りが出る）。
pub fn regression_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for (i, y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let n = n as f64;
    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denominator
}

/// トレンド分析器
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    thresholds: TrendThresholds,
}

impl TrendAnalyzer {
    /// 新しいトレンド分析器を作成
    pub fn new(thresholds: TrendThresholds) -> Self {
        Self { thresholds }
    }

    /// 回帰直線の傾きを計算
    pub fn slope(&self, values: &[f64]) -> f64 {
        regression_slope(values)
    }

    /// 傾きをトレンド方向に分類
    pub fn classify(&self, slope: f64) -> TrendDirection {
        if slope > self.thresholds.strong_upward {
            TrendDirection::StrongUpward
        } else if slope > self.thresholds.upward {
            TrendDirection::Upward
        } else if slope < self.thresholds.strong_downward {
            TrendDirection::StrongDownward
        } else if slope < self.thresholds.downward {
            TrendDirection::Downward
        } else {
            TrendDirection::Stable
        }
    }

    /// シーケンス全体のトレンド方向
    ///
    /// 2点未満は判定不能としてStableを返す。
    pub fn direction(&self, values: &[f64]) -> TrendDirection {
        if values.len() < 2 {
            return TrendDirection::Stable;
        }
        self.classify(self.slope(values))
    }
}

/// トレンド分析結果
///
/// (倉庫, メトリクス種類, 期間) ウィンドウの統計サマリー。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysisResult {
    /// 対象倉庫ID
    pub warehouse_id: Uuid,
    /// 対象メトリクス種類
    pub metric_type: MetricType,
    /// 期間の開始
    pub period_start: DateTime<Utc>,
    /// 期間の終了
    pub period_end: DateTime<Utc>,
    /// 平均値
    pub average: f64,
    /// 標本標準偏差
    pub std_dev: f64,
    /// 分散
    pub variance: f64,
    /// 最小値
    pub minimum: f64,
    /// 最大値
    pub maximum: f64,
    /// 中央値
    pub median: f64,
    /// 回帰直線の傾き
    pub trend_slope: f64,
    /// 全体のトレンド方向
    pub overall_trend: TrendDirection,
    /// 変化率（最終値 vs 初期値、%）
    pub change_percentage: Option<f64>,
    /// データポイント数
    pub data_point_count: usize,
    /// データ品質スコア [0, 100]
    pub data_quality_score: f64,
    /// データ完全性スコア [0, 100]
    pub completeness_score: f64,
    /// 所見
    pub insights: Vec<String>,
    /// 推奨アクション
    pub recommendations: Vec<String>,
    /// 性能グレード（A-F）
    pub performance_grade: char,
}

impl TrendAnalysisResult {
    /// 空ウィンドウ用の結果を作成
    pub fn empty(
        warehouse_id: Uuid,
        metric_type: MetricType,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Self {
        Self {
            warehouse_id,
            metric_type,
            period_start,
            period_end,
            average: 0.0,
            std_dev: 0.0,
            variance: 0.0,
            minimum: 0.0,
            maximum: 0.0,
            median: 0.0,
            trend_slope: 0.0,
            overall_trend: TrendDirection::Stable,
            change_percentage: None,
            data_point_count: 0,
            data_quality_score: 0.0,
            completeness_score: 0.0,
            insights: Vec::new(),
            recommendations: Vec::new(),
            performance_grade: 'F',
        }
    }
}
