//! CSV Export
//!
//! メトリクスの CSV レンダリング。フィールドにカンマ・引用符・改行を
//! 含む場合は RFC 4180 に従って二重引用符でエスケープする。

use crate::error::Result;
use crate::model::PerformanceMetric;

/// CSV ヘッダ行
pub const CSV_HEADER: &str =
    "id,warehouse_id,metric_type,category,value,unit,performance_score,alert_level,recorded_at";

/// メトリクス一覧を CSV 文字列にレンダリング
///
/// 行順は入力順をそのまま保持する。空入力でもヘッダ行は出力する。
pub fn to_csv(metrics: &[PerformanceMetric]) -> Result<String> {
    let mut out = String::with_capacity(64 + metrics.len() * 96);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for metric in metrics {
        let fields = [
            metric.id.to_string(),
            metric.warehouse_id.to_string(),
            metric.metric_type.name().to_string(),
            metric.metric_category.name().to_string(),
            metric.value.to_string(),
            metric.unit.clone(),
            metric.performance_score.to_string(),
            metric.alert_level.name().to_string(),
            metric.recorded_at.to_rfc3339(),
        ];
        let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    Ok(out)
}

/// CSV フィールドのエスケープ
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
