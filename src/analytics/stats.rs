//! Basic Statistics
//!
//! 測定値シーケンスの基本統計量

use serde::{Deserialize, Serialize};

/// 丸め精度（小数点以下の桁数）
pub const ROUND_SCALE: i32 = 4;

/// 四捨五入（half-up）で指定桁に丸める
pub fn round_half_up(value: f64, scale: i32) -> f64 {
    let factor = 10f64.powi(scale);
    (value * factor).round() / factor
}

/// 算術平均（half-upで丸め）
///
/// 空のシーケンスは0.0を返す。空チェックは呼び出し側の責務。
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    round_half_up(raw_mean(values), ROUND_SCALE)
}

/// 丸めなしの算術平均（内部計算用）
fn raw_mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// 標本標準偏差（分母 n-1）
///
/// n <= 1 の場合は0.0。
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let mean = raw_mean(values);
    let sum_squared = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    (sum_squared / (values.len() - 1) as f64).sqrt()
}

/// 中央値
///
/// 偶数個の場合は中央2要素の平均。空のシーケンスは0.0。
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// 最小値（空のシーケンスは0.0）
pub fn min(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .min_by(|a, b| a.total_cmp(b))
        .unwrap_or(0.0)
}

/// 最大値（空のシーケンスは0.0）
pub fn max(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .max_by(|a, b| a.total_cmp(b))
        .unwrap_or(0.0)
}

/// シーケンスの統計サマリー
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesStats {
    /// サンプル数
    pub count: usize,
    /// 合計
    pub sum: f64,
    /// 平均値
    pub mean: f64,
    /// 標本標準偏差
    pub std_dev: f64,
    /// 分散
    pub variance: f64,
    /// 最小値
    pub min: f64,
    /// 最大値
    pub max: f64,
    /// 中央値
    pub median: f64,
}

impl SeriesStats {
    /// 値のリストから統計を計算
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let std_dev = std_dev(values);
        Self {
            count: values.len(),
            sum: values.iter().sum(),
            mean: mean(values),
            std_dev,
            variance: std_dev * std_dev,
            min: min(values),
            max: max(values),
            median: median(values),
        }
    }
}

impl Default for SeriesStats {
    fn default() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            mean: 0.0,
            std_dev: 0.0,
            variance: 0.0,
            min: 0.0,
            max: 0.0,
            median: 0.0,
        }
    }
}
