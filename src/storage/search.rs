//! Search Index
//!
//! ベストエフォートの全文検索インデックス。障害時はサービス層が
//! ストアのテキストフィルタにフォールバックする。

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::model::PerformanceMetric;

/// 検索インデックス
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// メトリクスをインデックスに登録
    async fn index(&self, metric: &PerformanceMetric) -> Result<()>;

    /// フリーテキスト検索
    async fn search(&self, text: &str) -> Result<Vec<PerformanceMetric>>;

    /// インデックスから削除
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// インデックスを全消去（再インデックス用）
    async fn clear(&self) -> Result<()>;
}

/// インメモリ検索インデックス
#[derive(Debug, Default)]
pub struct MemorySearchIndex {
    documents: Arc<RwLock<HashMap<Uuid, PerformanceMetric>>>,
}

impl MemorySearchIndex {
    /// 新しいインデックスを作成
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SearchIndex for MemorySearchIndex {
    async fn index(&self, metric: &PerformanceMetric) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.insert(metric.id, metric.clone());
        Ok(())
    }

    async fn search(&self, text: &str) -> Result<Vec<PerformanceMetric>> {
        let needle = text.to_lowercase();
        let documents = self.documents.read().await;
        let mut hits: Vec<PerformanceMetric> = documents
            .values()
            .filter(|m| {
                m.metric_type.name().to_lowercase().contains(&needle)
                    || m.description
                        .as_deref()
                        .map(|d| d.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                    || m.tags
                        .values()
                        .any(|v| v.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at));
        Ok(hits)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut documents = self.documents.write().await;
        Ok(documents.remove(&id).is_some())
    }

    async fn clear(&self) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.clear();
        Ok(())
    }
}
