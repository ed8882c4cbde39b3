//! Metric Forecasting
//!
//! 回帰直線の外挿による線形予測

use crate::analytics::trend;
use crate::error::{Error, Result};

/// 予測エンジン
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    /// 予測期間の上限（日数）
    max_horizon_days: u32,
    /// 予測に必要な最小サンプル数
    min_samples: usize,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self {
            max_horizon_days: 90,
            min_samples: 7,
        }
    }
}

impl ForecastEngine {
    /// 新しい予測エンジンを作成
    pub fn new(max_horizon_days: u32, min_samples: usize) -> Self {
        Self {
            max_horizon_days,
            min_samples,
        }
    }

    /// 予測期間の上限を取得
    pub fn max_horizon_days(&self) -> u32 {
        self.max_horizon_days
    }

    /// 予測期間を検証
    ///
    /// 上限超過は黙って切り詰めずバリデーションエラーにする。
    pub fn check_horizon(&self, horizon_days: u32) -> Result<()> {
        if horizon_days > self.max_horizon_days {
            return Err(Error::Validation(format!(
                "forecast horizon of {} days exceeds the maximum of {} days",
                horizon_days, self.max_horizon_days
            )));
        }
        Ok(())
    }

    /// 線形外挿による予測値を生成
    ///
    /// `forecast[i] = last + slope * i` (i = 1..=horizon)。メトリクスは
    /// 非負の量と仮定し、各予測値を0にクランプする。サンプル不足の
    /// 場合は空の予測を返す（データ不足ポリシーでありエラーではない）。
    pub fn forecast(&self, values: &[f64], horizon_days: u32) -> Result<Vec<f64>> {
        self.check_horizon(horizon_days)?;

        if values.len() < self.min_samples {
            return Ok(Vec::new());
        }

        let slope = trend::regression_slope(values);
        let last = values.last().copied().unwrap_or(0.0);

        let forecast = (1..=horizon_days)
            .map(|i| (last + slope * i as f64).max(0.0))
            .collect();
        Ok(forecast)
    }
}
