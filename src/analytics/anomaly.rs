//! Anomaly Detection
//!
//! Zスコア法による外れ値検知

use crate::analytics::stats;
use crate::model::PerformanceMetric;

/// 異常検知器
///
/// ウィンドウ内の平均と標準偏差からZスコア閾値を超える測定値を抽出する。
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    /// 標準偏差の倍率閾値
    threshold: f64,
    /// 検知に必要な最小サンプル数
    min_samples: usize,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self {
            threshold: 2.0,
            min_samples: 10,
        }
    }
}

impl AnomalyDetector {
    /// 新しい異常検知器を作成
    pub fn new(threshold: f64, min_samples: usize) -> Self {
        Self {
            threshold,
            min_samples,
        }
    }

    /// 異常なメトリクスを検知
    ///
    /// サンプル数が最小値未満の場合は空を返す（統計的検出力不足は
    /// ポリシー判断でありエラーではない）。フラグされたレコード自体を
    /// 返す。呼び出し側はIDで元レコードと突き合わせる。
    pub fn detect(&self, metrics: &[PerformanceMetric]) -> Vec<PerformanceMetric> {
        if metrics.len() < self.min_samples {
            return Vec::new();
        }

        let values: Vec<f64> = metrics.iter().map(|m| m.value).collect();
        let mean = stats::mean(&values);
        let std_dev = stats::std_dev(&values);
        if std_dev < f64::EPSILON {
            // 分散ゼロのウィンドウに外れ値は存在しない
            return Vec::new();
        }

        let limit = std_dev * self.threshold;
        metrics
            .iter()
            .filter(|m| (m.value - mean).abs() > limit)
            .cloned()
            .collect()
    }
}
