use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// 日志级别由 `RUST_LOG` 控制，默认 `info`。重复调用时忽略后续初始化。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
