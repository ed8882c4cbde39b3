//! Performance Metric Model
//!
//! 倉庫パフォーマンスメトリクスの型定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// メトリクスの種類
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    /// 処理スループット
    Throughput,
    /// 作業効率
    Efficiency,
    /// 精度（エラー率の逆指標）
    Accuracy,
    /// 生産性
    Productivity,
    /// 稼働率
    Utilization,
    /// コスト
    Cost,
    /// 売上
    Revenue,
    /// 品質スコア
    Quality,
    /// サイクルタイム
    CycleTime,
    /// リードタイム
    LeadTime,
    /// 稼働時間
    Uptime,
    /// 在庫数量
    InventoryLevel,
    /// 在庫回転率
    InventoryTurnover,
    /// 棚卸精度
    StockAccuracy,
    /// 注文フルフィルメント率
    OrderFulfillment,
    /// 注文精度
    OrderAccuracy,
    /// 注文処理時間
    OrderProcessingTime,
    /// 保管スペース使用率
    StorageUtilization,
    /// スタッフ稼働率
    StaffUtilization,
    /// エネルギー消費量
    EnergyConsumption,
    /// カスタムメトリクス
    Custom(String),
}

impl MetricType {
    /// メトリクス名を取得
    pub fn name(&self) -> &str {
        match self {
            Self::Throughput => "throughput",
            Self::Efficiency => "efficiency",
            Self::Accuracy => "accuracy",
            Self::Productivity => "productivity",
            Self::Utilization => "utilization",
            Self::Cost => "cost",
            Self::Revenue => "revenue",
            Self::Quality => "quality",
            Self::CycleTime => "cycle_time",
            Self::LeadTime => "lead_time",
            Self::Uptime => "uptime",
            Self::InventoryLevel => "inventory_level",
            Self::InventoryTurnover => "inventory_turnover",
            Self::StockAccuracy => "stock_accuracy",
            Self::OrderFulfillment => "order_fulfillment",
            Self::OrderAccuracy => "order_accuracy",
            Self::OrderProcessingTime => "order_processing_time",
            Self::StorageUtilization => "storage_utilization",
            Self::StaffUtilization => "staff_utilization",
            Self::EnergyConsumption => "energy_consumption",
            Self::Custom(name) => name,
        }
    }

    /// 既定の測定単位を取得
    pub fn default_unit(&self) -> &str {
        match self {
            Self::Efficiency
            | Self::Accuracy
            | Self::Utilization
            | Self::Uptime
            | Self::StockAccuracy
            | Self::OrderFulfillment
            | Self::OrderAccuracy
            | Self::StorageUtilization
            | Self::StaffUtilization => "%",
            Self::Throughput => "units/h",
            Self::Productivity => "units/person-hour",
            Self::Cost | Self::Revenue => "USD",
            Self::Quality => "score",
            Self::CycleTime | Self::OrderProcessingTime => "min",
            Self::LeadTime => "h",
            Self::InventoryLevel => "units",
            Self::InventoryTurnover => "turns/year",
            Self::EnergyConsumption => "kWh",
            Self::Custom(_) => "",
        }
    }
}

/// メトリクスのカテゴリ
///
/// スコアリングの重み付けはカテゴリ単位で行う。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    /// オペレーション効率
    Operations,
    /// 財務（コスト系、低いほど良い）
    Financial,
    /// 品質管理
    Quality,
    /// 在庫管理
    Inventory,
    /// カスタマーサービス
    CustomerService,
    /// リソース管理
    ResourceManagement,
    /// 安全管理
    Safety,
}

impl MetricCategory {
    /// 全カテゴリ（ダッシュボード集計用）
    pub const ALL: [MetricCategory; 7] = [
        Self::Operations,
        Self::Financial,
        Self::Quality,
        Self::Inventory,
        Self::CustomerService,
        Self::ResourceManagement,
        Self::Safety,
    ];

    /// カテゴリ名を取得
    pub fn name(&self) -> &'static str {
        match self {
            Self::Operations => "operations",
            Self::Financial => "financial",
            Self::Quality => "quality",
            Self::Inventory => "inventory",
            Self::CustomerService => "customer_service",
            Self::ResourceManagement => "resource_management",
            Self::Safety => "safety",
        }
    }
}

/// 測定周期
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementPeriod {
    /// リアルタイム測定
    RealTime,
    /// 時間毎
    Hourly,
    /// 日次
    Daily,
    /// 週次
    Weekly,
    /// 月次
    Monthly,
    /// 四半期毎
    Quarterly,
    /// 年次
    Yearly,
}

/// アラート重大度
///
/// 生の測定値に対する固定閾値から導出される。性能スコアとは独立。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    /// 情報のみ、対応不要
    Info,
    /// 軽微な逸脱
    Low,
    /// 中程度の逸脱
    Medium,
    /// 重大な逸脱
    High,
    /// 即時対応が必要な深刻な逸脱
    Critical,
}

impl AlertLevel {
    /// レベル名を取得
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// トレンド方向
///
/// 回帰直線の傾きを固定閾値で分類した定性バケット。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// 強い上昇傾向
    StrongUpward,
    /// 上昇傾向
    Upward,
    /// 安定
    Stable,
    /// 下降傾向
    Downward,
    /// 強い下降傾向
    StrongDownward,
}

impl TrendDirection {
    /// 方向名を取得
    pub fn name(&self) -> &'static str {
        match self {
            Self::StrongUpward => "strong_upward",
            Self::Upward => "upward",
            Self::Stable => "stable",
            Self::Downward => "downward",
            Self::StrongDownward => "strong_downward",
        }
    }
}

/// 記録前のメトリクス（取り込みペイロード）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMetric {
    /// 対象倉庫ID
    pub warehouse_id: Uuid,
    /// メトリクスの種類
    pub metric_type: MetricType,
    /// カテゴリ
    pub metric_category: MetricCategory,
    /// 測定値
    pub value: f64,
    /// 測定単位
    pub unit: String,
    /// 測定周期
    pub measurement_period: MeasurementPeriod,
    /// 説明（検索対象）
    pub description: Option<String>,
    /// タグ（ラベル）
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl NewMetric {
    /// 新しい取り込みペイロードを作成
    pub fn new(
        warehouse_id: Uuid,
        metric_type: MetricType,
        metric_category: MetricCategory,
        value: f64,
    ) -> Self {
        let unit = metric_type.default_unit().to_string();
        Self {
            warehouse_id,
            metric_type,
            metric_category,
            value,
            unit,
            measurement_period: MeasurementPeriod::Daily,
            description: None,
            tags: HashMap::new(),
        }
    }

    /// 測定単位を設定
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// 測定周期を設定
    pub fn with_period(mut self, period: MeasurementPeriod) -> Self {
        self.measurement_period = period;
        self
    }

    /// 説明を設定
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// タグを追加
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// 記録済みパフォーマンスメトリクス
///
/// 派生フィールド（performance_score, alert_level, is_alert）は
/// 測定値が変わるたびに再計算される純粋関数の結果であり、
/// 独立して永続化されることはない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetric {
    /// メトリクスID
    pub id: Uuid,
    /// 対象倉庫ID
    pub warehouse_id: Uuid,
    /// メトリクスの種類
    pub metric_type: MetricType,
    /// カテゴリ
    pub metric_category: MetricCategory,
    /// 測定値
    pub value: f64,
    /// 測定単位
    pub unit: String,
    /// 測定周期
    pub measurement_period: MeasurementPeriod,
    /// 説明（検索対象）
    pub description: Option<String>,
    /// 性能スコア [0, 100]
    pub performance_score: f64,
    /// アラート重大度
    pub alert_level: AlertLevel,
    /// アクティブアラートか
    pub is_alert: bool,
    /// アクティブか（falseはアーカイブ済み）
    pub is_active: bool,
    /// 記録日時
    pub recorded_at: DateTime<Utc>,
    /// アーカイブ日時
    pub archived_at: Option<DateTime<Utc>>,
    /// 最終更新者
    pub last_updated_by: Option<String>,
    /// 最終更新日時
    pub last_updated_at: Option<DateTime<Utc>>,
    /// 楽観ロック用バージョン
    pub version: u64,
    /// タグ（ラベル）
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl PerformanceMetric {
    /// 取り込みペイロードから記録済みメトリクスを作成
    ///
    /// スコアとアラートレベルは呼び出し側（サービス層）が
    /// スコアラー／アラートエンジンで算出して渡す。
    pub fn record(
        draft: NewMetric,
        recorded_by: impl Into<String>,
        performance_score: f64,
        alert_level: AlertLevel,
    ) -> Self {
        let is_alert = alert_level != AlertLevel::Info;
        Self {
            id: Uuid::new_v4(),
            warehouse_id: draft.warehouse_id,
            metric_type: draft.metric_type,
            metric_category: draft.metric_category,
            value: draft.value,
            unit: draft.unit,
            measurement_period: draft.measurement_period,
            description: draft.description,
            performance_score,
            alert_level,
            is_alert,
            is_active: true,
            recorded_at: Utc::now(),
            archived_at: None,
            last_updated_by: Some(recorded_by.into()),
            last_updated_at: None,
            version: 0,
            tags: draft.tags,
        }
    }
}
