use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::domain::error::{AppError, Result};
use crate::infrastructure::bootstrap::build_overlay;
use crate::infrastructure::config::GraderConfig;
use crate::infrastructure::page::PageSnapshot;
use crate::interfaces::cli::{Cli, Command};
use crate::interfaces::dev_backend::{start_dev_backend, CannedResponse, DevBackendConfig};

pub fn run() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let cli = Cli::parse();
    let outcome = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to start runtime: {}", e)))
        .and_then(|runtime| runtime.block_on(dispatch(cli)));

    if let Err(err) = outcome {
        error!(error = %err, "card-grader failed");
        std::process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = GraderConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Grade {
            url,
            html,
            out,
            open_panel,
            expand_review,
        } => grade_page(&config, url, html, out, open_panel, expand_review).await,
        Command::DevBackend {
            port,
            markdown,
            status,
            body,
            delay_ms,
        } => {
            let port = port.unwrap_or(config.dev_backend_port);
            let backend_config = match markdown {
                Some(path) => DevBackendConfig::markdown(port, path),
                None => DevBackendConfig::canned(
                    port,
                    CannedResponse {
                        status,
                        body,
                        delay_ms,
                    },
                ),
            };
            let running = start_dev_backend(backend_config).await?;
            tokio::signal::ctrl_c().await?;
            info!("Stopping dev backend");
            running.handle.stop(true).await;
            Ok(())
        }
    }
}

async fn grade_page(
    config: &GraderConfig,
    url: String,
    html: Option<PathBuf>,
    out: Option<PathBuf>,
    open_panel: bool,
    expand_review: bool,
) -> Result<()> {
    let page = match html {
        Some(path) => PageSnapshot::from_file(&url, &path)?,
        None => PageSnapshot::fetch(&reqwest::Client::new(), &url).await?,
    };

    let Some(overlay) = build_overlay(config, page)? else {
        warn!(url = %url, trusted_host = %config.trusted_host, "Page is not on the trusted host; nothing to do");
        return Ok(());
    };

    overlay.click().await;
    if open_panel && overlay.session().last_report().is_some() {
        overlay.click().await;
        if expand_review && overlay.toggle_full_review().is_none() {
            warn!("Report has no full review to expand");
        }
    }

    if let Some(view) = overlay.badge_view() {
        println!("{}", view.label);
    }
    if let Some(path) = out {
        write_overlay(&path, &overlay.render().to_html())?;
        info!(path = %path.display(), "Overlay written");
    }
    Ok(())
}

fn write_overlay(path: &Path, fragment: &str) -> Result<()> {
    let document = format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>Model card audit</title></head><body>{}</body></html>\n",
        fragment
    );
    std::fs::write(path, document)
        .map_err(|e| AppError::IoError(format!("Failed to write {}: {}", path.display(), e)))
}
