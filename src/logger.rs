//! 日志初始化
//!
//! 使用 `tracing-subscriber`，级别由 `RUST_LOG` 控制

use tracing_subscriber::EnvFilter;

/// 初始化全局日志，默认 `info` 级别
///
/// 重复调用是安全的（测试中会多次初始化）
pub fn init() {
    init_with_level("info");
}

/// 以指定的默认级别初始化日志；`RUST_LOG` 存在时优先使用
pub fn init_with_level(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
