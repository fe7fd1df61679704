//! LeadForge — ad copy generation and lead forecasting server.

use std::path::PathBuf;
use std::sync::Arc;

use leadforge_server::{build_router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn resolve_data_dir() -> PathBuf {
    std::env::var("LEADFORGE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--help" | "-h" | "help" => {
                println!("LeadForge — ad copy generation and lead forecasting server");
                println!();
                println!("Usage: leadforge");
                println!();
                println!("Environment:");
                println!("  HOST, PORT               Listen address (127.0.0.1:9091)");
                println!("  LEADFORGE_DATA_DIR       Data directory (data)");
                println!("  LEADFORGE_RUN_HISTORY    Runs kept in history (120)");
                println!("  OPENAI_API_KEY           Enables LLM generation");
                println!("  OPENAI_ALLOW_FALLBACK    \"true\" to fall back to rule-based copy");
                return Ok(());
            }
            other => {
                anyhow::bail!("Unknown argument: {}. Use 'leadforge help' for usage.", other);
            }
        }
    }

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = leadforge_core::LeadForgeConfig::from_env(&data_dir)?;
    let addr = config.bind_addr();

    let state = Arc::new(AppState::new(config));
    {
        let llm = state.llm_config.read();
        info!(
            "LLM generation {} (model {}, fallback {})",
            if llm.is_configured() { "enabled" } else { "disabled" },
            llm.model,
            llm.allow_fallback
        );
    }

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("LeadForge server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
