//! Analytics Report Model
//!
//! 分析レポートの型定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::metric::MetricType;

/// レポートの種類
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// 期間内の性能サマリー
    PerformanceSummary,
    /// トレンド分析レポート
    TrendAnalysis,
    /// アラートダイジェスト
    AlertDigest,
    /// 生データエクスポート
    RawExport,
}

/// レポート出力フォーマット
///
/// PDF/Excelはスコープ外。バイナリレンダリングは外部コラボレータの責務。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// CSV（メトリクスフィールドの表形式シリアライズ）
    Csv,
    /// プレーンテキストサマリー
    Text,
}

/// レポート生成状態
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// 生成中
    Generating,
    /// 生成完了
    Completed,
    /// 生成失敗
    Failed,
}

/// レポート生成リクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// レポートタイトル
    pub title: String,
    /// 説明
    pub description: Option<String>,
    /// レポートの種類
    pub report_type: ReportType,
    /// 出力フォーマット
    pub format: ReportFormat,
    /// 対象倉庫ID
    pub warehouse_id: Uuid,
    /// 対象メトリクス種類（トレンド分析で必須）
    pub metric_type: Option<MetricType>,
    /// 対象期間の開始
    pub period_start: DateTime<Utc>,
    /// 対象期間の終了
    pub period_end: DateTime<Utc>,
}

/// 生成済み分析レポート
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// レポートID
    pub id: Uuid,
    /// レポート名
    pub name: String,
    /// 説明
    pub description: Option<String>,
    /// レポートの種類
    pub report_type: ReportType,
    /// 出力フォーマット
    pub format: ReportFormat,
    /// 生成状態
    pub status: ReportStatus,
    /// 対象倉庫ID
    pub warehouse_id: Uuid,
    /// 対象期間の開始
    pub period_start: DateTime<Utc>,
    /// 対象期間の終了
    pub period_end: DateTime<Utc>,
    /// 生成者
    pub generated_by: String,
    /// レポート本体（フォーマット非依存のバイト列）
    #[serde(default)]
    pub content: Vec<u8>,
    /// 失敗時のエラーメッセージ
    pub error_message: Option<String>,
    /// 生成開始日時
    pub generated_at: DateTime<Utc>,
    /// 生成完了日時
    pub completed_at: Option<DateTime<Utc>>,
}

impl AnalyticsReport {
    /// 生成中状態のレポートを作成
    pub fn start(request: &ReportRequest, generated_by: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.title.clone(),
            description: request.description.clone(),
            report_type: request.report_type,
            format: request.format,
            status: ReportStatus::Generating,
            warehouse_id: request.warehouse_id,
            period_start: request.period_start,
            period_end: request.period_end,
            generated_by: generated_by.into(),
            content: Vec::new(),
            error_message: None,
            generated_at: Utc::now(),
            completed_at: None,
        }
    }

    /// 生成完了をマーク
    pub fn complete(&mut self, content: Vec<u8>) {
        self.content = content;
        self.status = ReportStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    /// 生成失敗をマーク
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = ReportStatus::Failed;
        self.error_message = Some(message.into());
        self.completed_at = Some(Utc::now());
    }
}
