//! TurBo Catalog Builder 3000 - main entry point

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use turbocb3k::gui::UiLog;

fn main() -> Result<()> {
    // Environment variables (LaTeX engine override, RUST_LOG)
    dotenvy::dotenv().ok();

    // Logging: console plus the in-window log panel
    let ui_log = UiLog::new();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,turbocb3k=debug")))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(ui_log.clone()),
        )
        .init();

    // GUI application start
    turbocb3k::gui::run(ui_log)
}
