//! Performance Scoring
//!
//! カテゴリ重み付けによる0-100スコアの正規化

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::analytics::stats;
use crate::model::{MetricCategory, PerformanceMetric};

/// カテゴリ別スコアリング重み
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    /// オペレーション効率の重み
    pub operations: f64,
    /// 品質の重み
    pub quality: f64,
    /// リソース管理の重み
    pub resource_management: f64,
    /// 財務（コスト系）の重み
    pub financial: f64,
    /// その他カテゴリの既定重み
    pub default_weight: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            operations: 0.30,
            quality: 0.25,
            resource_management: 0.25,
            financial: 0.20,
            default_weight: 0.10,
        }
    }
}

impl CategoryWeights {
    /// カテゴリの重みを取得
    pub fn weight(&self, category: MetricCategory) -> f64 {
        match category {
            MetricCategory::Operations => self.operations,
            MetricCategory::Quality => self.quality,
            MetricCategory::ResourceManagement => self.resource_management,
            MetricCategory::Financial => self.financial,
            _ => self.default_weight,
        }
    }
}

/// パフォーマンススコアラー
#[derive(Debug, Clone, Default)]
pub struct PerformanceScorer {
    weights: CategoryWeights,
}

impl PerformanceScorer {
    /// 新しいスコアラーを作成
    pub fn new(weights: CategoryWeights) -> Self {
        Self { weights }
    }

    /// 測定値を性能スコア [0, 100] に変換
    ///
    /// 財務カテゴリはコスト系メトリクスのため反転する:
    /// `score = 100 - value * weight`。コストは低いほど良いという
    /// ドメインルールであり、バグではない。
    pub fn score(&self, category: MetricCategory, value: f64) -> f64 {
        let weight = self.weights.weight(category);
        match category {
            MetricCategory::Financial => (100.0 - value * weight).clamp(0.0, 100.0),
            _ => (value * weight).clamp(0.0, 100.0),
        }
    }

    /// 倉庫効率スコアを計算
    ///
    /// ウィンドウ内のメトリクスをカテゴリでグループ化し、各カテゴリの
    /// 平均性能スコアを同じ固定重みで加重平均する。測定値が無ければ0.0。
    pub fn efficiency_score(&self, metrics: &[PerformanceMetric]) -> f64 {
        if metrics.is_empty() {
            return 0.0;
        }

        let mut grouped: HashMap<MetricCategory, Vec<f64>> = HashMap::new();
        for metric in metrics {
            grouped
                .entry(metric.metric_category)
                .or_default()
                .push(metric.performance_score);
        }

        let mut total_weighted = 0.0;
        let mut total_weight = 0.0;
        for (category, scores) in &grouped {
            let category_average = stats::mean(scores);
            let weight = self.weights.weight(*category);
            total_weighted += category_average * weight;
            total_weight += weight;
        }

        if total_weight <= 0.0 {
            return 0.0;
        }
        stats::round_half_up(total_weighted / total_weight, stats::ROUND_SCALE)
    }
}
