//! 日誌初始化
//!
//! 使用 tracing-subscriber，日誌一律輸出到 stderr。

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日誌系統
///
/// `RUST_LOG` 優先；未設定時預設 info，`verbose` 時預設 debug。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_line_number(verbose)
        .try_init();
}

/// 測試用日誌（可重複呼叫）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
