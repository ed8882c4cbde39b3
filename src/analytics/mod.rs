//! Analytics Components
//!
//! 統計分析コンポーネント群。いずれも純粋・同期・ステートレスで、
//! 同じ入力シーケンスからは常に同じ出力を返す。

pub mod alerts;
pub mod anomaly;
pub mod correlation;
pub mod forecast;
pub mod scoring;
pub mod stats;
pub mod trend;

pub use alerts::{AlertEngine, AlertThresholds};
pub use anomaly::AnomalyDetector;
pub use correlation::CorrelationEngine;
pub use forecast::ForecastEngine;
pub use scoring::{CategoryWeights, PerformanceScorer};
pub use stats::SeriesStats;
pub use trend::{TrendAnalysisResult, TrendAnalyzer, TrendThresholds};
