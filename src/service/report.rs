//! Report Rendering
//!
//! レポート本体のレンダリング。CSVはエクスポートモジュールに委譲、
//! テキストは期間サマリーを組み立てる。

use chrono::Utc;

use crate::analytics::stats;
use crate::error::Result;
use crate::export;
use crate::model::{PerformanceMetric, ReportFormat, ReportRequest, ReportType};

/// レポートレンダラー
#[derive(Debug, Clone, Default)]
pub struct ReportGenerator;

impl ReportGenerator {
    /// 新しいレンダラーを作成
    pub fn new() -> Self {
        Self
    }

    /// リクエストとウィンドウ内メトリクスからレポート本体を生成
    pub fn render(
        &self,
        request: &ReportRequest,
        metrics: &[PerformanceMetric],
    ) -> Result<Vec<u8>> {
        match request.format {
            ReportFormat::Csv => export::to_csv(metrics).map(String::into_bytes),
            ReportFormat::Text => Ok(self.render_text(request, metrics).into_bytes()),
        }
    }

    fn render_text(&self, request: &ReportRequest, metrics: &[PerformanceMetric]) -> String {
        let mut content = String::new();
        content.push_str(&format!("Analytics Report: {}\n", request.title));
        content.push_str(&format!("Generated: {}\n", Utc::now().to_rfc3339()));
        content.push_str(&format!(
            "Period: {} to {}\n\n",
            request.period_start.to_rfc3339(),
            request.period_end.to_rfc3339()
        ));
        content.push_str(&format!("Total Metrics: {}\n", metrics.len()));

        if !metrics.is_empty() {
            let values: Vec<f64> = metrics.iter().map(|m| m.value).collect();
            content.push_str(&format!("Average Value: {}\n", stats::mean(&values)));

            let scores: Vec<f64> = metrics.iter().map(|m| m.performance_score).collect();
            content.push_str(&format!("Average Performance: {}\n", stats::mean(&scores)));
        }

        if request.report_type == ReportType::AlertDigest {
            let alert_count = metrics.iter().filter(|m| m.is_alert).count();
            content.push_str(&format!("Active Alerts: {}\n", alert_count));
            for metric in metrics.iter().filter(|m| m.is_alert) {
                content.push_str(&format!(
                    "  [{}] {} = {} {}\n",
                    metric.alert_level.name(),
                    metric.metric_type.name(),
                    metric.value,
                    metric.unit
                ));
            }
        }

        content
    }
}
