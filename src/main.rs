//! Wren - 会话助手入口
//!
//! 初始化日志、加载配置与凭证、创建会话编排器与 TUI，并运行主循环。

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wren::config::{load_config, AppConfig};
use wren::core::create_session;
use wren::ui::run_app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志：默认 info，可通过 RUST_LOG 覆盖
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with(fmt::layer())
        .init();

    let cfg = load_config(None).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        AppConfig::default()
    });

    // 凭证缺失在这里直接失败（启动期致命，不进入 TUI）
    let (cmd_tx, state_rx) = create_session(&cfg).context("Error configuring APIs")?;

    run_app(state_rx, cmd_tx, cfg.app).await.context("App run failed")?;

    Ok(())
}
