//! Domain Model
//!
//! メトリクスとレポートのドメインモデル

pub mod metric;
pub mod report;

pub use metric::{
    AlertLevel, MeasurementPeriod, MetricCategory, MetricType, NewMetric, PerformanceMetric,
    TrendDirection,
};
pub use report::{AnalyticsReport, ReportFormat, ReportRequest, ReportStatus, ReportType};
