//! Alert Engine
//!
//! 生の測定値に対する固定閾値からアラート重大度を導出する

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{AlertLevel, PerformanceMetric};

/// アラート閾値
///
/// 派生スコアではなく生の測定値を判定する。降順の閾値テーブル。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// これ以上はInfo
    pub info: f64,
    /// これ以上はLow
    pub low: f64,
    /// これ以上はMedium
    pub medium: f64,
    /// これ以上はHigh、未満はCritical
    pub high: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            info: 90.0,
            low: 70.0,
            medium: 50.0,
            high: 30.0,
        }
    }
}

/// アラートエンジン
#[derive(Debug, Clone, Default)]
pub struct AlertEngine {
    thresholds: AlertThresholds,
}

impl AlertEngine {
    /// 新しいアラートエンジンを作成
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    /// 測定値からアラート重大度を判定
    pub fn level_for(&self, value: f64) -> AlertLevel {
        if value >= self.thresholds.info {
            AlertLevel::Info
        } else if value >= self.thresholds.low {
            AlertLevel::Low
        } else if value >= self.thresholds.medium {
            AlertLevel::Medium
        } else if value >= self.thresholds.high {
            AlertLevel::High
        } else {
            AlertLevel::Critical
        }
    }

    /// 重大度がアクティブアラートに該当するか
    pub fn is_alert(&self, level: AlertLevel) -> bool {
        level != AlertLevel::Info
    }

    /// メトリクスの派生アラートフィールドを再計算
    ///
    /// 値が記録・更新されるたびに冪等に呼ばれる。アラート状態が
    /// 現在のデータから乖離しないための設計。
    pub fn apply(&self, metric: &mut PerformanceMetric) {
        let level = self.level_for(metric.value);
        metric.alert_level = level;
        metric.is_alert = self.is_alert(level);
    }

    /// アラートを確認済みにする
    ///
    /// `is_alert` をクリアして確認者と日時を記録する。`alert_level` は
    /// 監査履歴として保持され変更しない。
    pub fn acknowledge(
        &self,
        metric: &mut PerformanceMetric,
        acknowledged_by: &str,
        at: DateTime<Utc>,
    ) {
        metric.is_alert = false;
        metric.last_updated_by = Some(acknowledged_by.to_string());
        metric.last_updated_at = Some(at);
    }
}
