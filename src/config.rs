//! Engine Configuration
//!
//! スコアリング重み・閾値・ウィンドウ幅の設定。元実装でグローバル定数
//! だった値はすべてここに集約し、コンポーネント構築時に渡す。

use serde::{Deserialize, Serialize};

use crate::analytics::{AlertThresholds, CategoryWeights, TrendThresholds};

/// 分析エンジン設定
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// カテゴリ別スコアリング重み
    pub weights: CategoryWeights,
    /// トレンド分類閾値
    pub trend: TrendThresholds,
    /// アラート閾値
    pub alert: AlertThresholds,
    /// 異常検知のZスコア閾値（標準偏差の倍率）
    pub anomaly_threshold: f64,
    /// 異常検知に必要な最小サンプル数
    pub anomaly_min_samples: usize,
    /// 相関計算に必要な最小サンプル数
    pub correlation_min_samples: usize,
    /// 予測期間の上限（日数）
    pub forecast_max_horizon_days: u32,
    /// 予測に必要な最小サンプル数
    pub forecast_min_samples: usize,
    /// ダッシュボードの直近ウィンドウ（時間）
    pub dashboard_recent_hours: i64,
    /// 効率スコアのウィンドウ（日数）
    pub dashboard_efficiency_days: i64,
    /// リアルタイムメトリクスのウィンドウ（分）
    pub realtime_window_minutes: i64,
    /// アラート再計算スイープのウィンドウ（時間）
    pub alert_sweep_hours: i64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            weights: CategoryWeights::default(),
            trend: TrendThresholds::default(),
            alert: AlertThresholds::default(),
            anomaly_threshold: 2.0,
            anomaly_min_samples: 10,
            correlation_min_samples: 3,
            forecast_max_horizon_days: 90,
            forecast_min_samples: 7,
            dashboard_recent_hours: 24,
            dashboard_efficiency_days: 7,
            realtime_window_minutes: 60,
            alert_sweep_hours: 1,
        }
    }
}

impl AnalyticsConfig {
    /// 設定ファイルから読み込み、環境変数で上書き
    ///
    /// `analytics.toml` が無ければ既定値で動く。環境変数は
    /// `WAREHOUSE_ANALYTICS_` プレフィクス、ネストは `__` 区切り
    /// （例: `WAREHOUSE_ANALYTICS_WEIGHTS__OPERATIONS=0.4`）。
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from("analytics")
    }

    /// 指定した設定ファイル名から読み込み
    pub fn load_from(file_name: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(file_name).required(false))
            .add_source(
                config::Environment::with_prefix("WAREHOUSE_ANALYTICS").separator("__"),
            )
            .build()?;

        let config = settings.try_deserialize()?;
        Ok(config)
    }
}
