//! Binary entrypoint for the Vitrine server.
//!
//! The site root defaults to the working directory and can be overridden with
//! `VITRINE_ROOT`; the listen address defaults to `0.0.0.0:<port>` from the
//! config manifest and can be overridden with `VITRINE_ADDR`.
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vitrine_core::VITRINE_VERSION;
use vitrine_modules::ModuleCatalog;
use vitrine_server::{run, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!(version = VITRINE_VERSION, "starting vitrine");

    let root = PathBuf::from(std::env::var("VITRINE_ROOT").unwrap_or_else(|_| ".".to_string()));

    // Route mismatches and page load failures stop here, before anything is bound
    let site = vitrine_site::boot_from_root(&root, &ModuleCatalog::new())?;

    if !site.config().use_server {
        tracing::info!("server mode disabled");
        return Ok(());
    }

    let addr = std::env::var("VITRINE_ADDR")
        .unwrap_or_else(|_| format!("0.0.0.0:{}", site.config().port));
    run(&addr, AppState::new(site, root)).await?;
    Ok(())
}
