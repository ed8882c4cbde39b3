//! # warehouse-analytics-rs
//!
//! 倉庫運用メトリクスの統計分析エンジン。記録済みのパフォーマンス
//! メトリクスに対してトレンド検出・異常検知・相関分析・線形予測・
//! スコアリング・アラート判定・ダッシュボード集計を提供する。
//!
//! 分析コンポーネントはすべて純粋・決定的で、派生値は保存済みの
//! シーケンスから毎回再計算される。
//!
//! ## 使用例
//!
//! ```
//! use warehouse_analytics_rs::config::AnalyticsConfig;
//! use warehouse_analytics_rs::model::{MetricCategory, MetricType, NewMetric};
//! use warehouse_analytics_rs::service::AnalyticsService;
//! use uuid::Uuid;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> warehouse_analytics_rs::Result<()> {
//! let service = AnalyticsService::in_memory(AnalyticsConfig::default());
//!
//! let draft = NewMetric::new(
//!     Uuid::new_v4(),
//!     MetricType::Efficiency,
//!     MetricCategory::Operations,
//!     92.5,
//! );
//! let metric = service.record_metric(draft, "operator").await?;
//! assert!(!metric.is_alert);
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;

pub use config::AnalyticsConfig;
pub use error::{Error, Result};
pub use service::AnalyticsService;
