//! Correlation Analysis
//!
//! ピアソン相関係数の計算

use crate::analytics::stats;

/// 相関分析エンジン
#[derive(Debug, Clone)]
pub struct CorrelationEngine {
    /// 計算に必要な最小サンプル数（系列ごと）
    min_samples: usize,
}

impl Default for CorrelationEngine {
    fn default() -> Self {
        Self { min_samples: 3 }
    }
}

impl CorrelationEngine {
    /// 新しい相関エンジンを作成
    pub fn new(min_samples: usize) -> Self {
        Self { min_samples }
    }

    /// ピアソン相関係数を計算
    ///
    /// 系列は位置で整列し、長さが異なる場合は短い方に切り詰める。
    /// サンプル不足・分母ゼロ（定数系列）の場合は0.0を返す。
    /// 相関が定義できない状況では「信号なし」を安全な既定値とする。
    pub fn pearson(&self, xs: &[f64], ys: &[f64]) -> f64 {
        let n = xs.len().min(ys.len());
        if n < self.min_samples {
            return 0.0;
        }
        let xs = &xs[..n];
        let ys = &ys[..n];

        let mean_x = xs.iter().sum::<f64>() / n as f64;
        let mean_y = ys.iter().sum::<f64>() / n as f64;

        let mut numerator = 0.0;
        let mut sum_x_sq = 0.0;
        let mut sum_y_sq = 0.0;
        for i in 0..n {
            let dx = xs[i] - mean_x;
            let dy = ys[i] - mean_y;
            numerator += dx * dy;
            sum_x_sq += dx * dx;
            sum_y_sq += dy * dy;
        }

        let denominator = (sum_x_sq * sum_y_sq).sqrt();
        if denominator < f64::EPSILON {
            return 0.0;
        }
        stats::round_half_up(numerator / denominator, stats::ROUND_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sequences_correlate_perfectly() {
        let engine = CorrelationEngine::default();
        let series = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(engine.pearson(&series, &series), 1.0);
    }

    #[test]
    fn test_inverse_sequences_correlate_negatively() {
        let engine = CorrelationEngine::default();
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [4.0, 3.0, 2.0, 1.0];
        assert_eq!(engine.pearson(&xs, &ys), -1.0);
    }

    #[test]
    fn test_constant_sequence_returns_zero() {
        let engine = CorrelationEngine::default();
        let constant = [5.0, 5.0, 5.0, 5.0];
        let varying = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(engine.pearson(&constant, &varying), 0.0);
        assert_eq!(engine.pearson(&constant, &constant), 0.0);
    }

    #[test]
    fn test_too_few_samples_returns_zero() {
        let engine = CorrelationEngine::default();
        assert_eq!(engine.pearson(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
        assert_eq!(engine.pearson(&[], &[]), 0.0);
    }

    #[test]
    fn test_unequal_lengths_truncate() {
        let engine = CorrelationEngine::default();
        let xs = [1.0, 2.0, 3.0, 100.0];
        let ys = [1.0, 2.0, 3.0];
        assert_eq!(engine.pearson(&xs, &ys), 1.0);
    }
}
