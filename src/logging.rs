//! Logging Initialization
//!
//! tracing ベースの構造化ログ初期化。レベルは `RUST_LOG` 環境変数で
//! 上書き可能。本番環境では JSON 出力に切り替えられる。

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログ設定
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// ログレベル (trace, debug, info, warn, error)
    pub level: String,
    /// JSON 形式で出力するか
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// ログサブスクライバを初期化
///
/// 二重初期化はエラーにせず無視する（テストから複数回呼ばれるため）。
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };

    if result.is_err() {
        tracing::debug!("logging already initialized, skipping");
    }
    Ok(())
}
