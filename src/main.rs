use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use gallerist::app::GalleryApp;
use gallerist::config;
use gallerist::lightbox::Slide;
use gallerist::model::MediaRecord;
use gallerist::remote::HttpLibraryClient;
use gallerist::surface::{GridSurface, StatusKind, StatusSink, ViewerButton, ViewerSurface};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
}

/// Headless grid for smoke runs: every render call becomes a log line and
/// elements settle immediately.
struct LogGrid;

#[async_trait]
impl GridSurface for LogGrid {
    fn insert(&self, record: &Arc<MediaRecord>) {
        debug!(name = %record.name, kind = ?record.kind, "grid insert");
    }

    fn clear(&self) {
        debug!("grid cleared");
    }

    fn set_viewed(&self, name: &str) {
        debug!(name, "grid viewed");
    }

    fn set_favorite(&self, name: &str, favorite: bool) {
        debug!(name, favorite, "grid favorite");
    }

    fn unobserve(&self, name: &str) {
        debug!(name, "grid unobserve");
    }

    fn set_loading(&self, visible: bool) {
        debug!(visible, "grid loading indicator");
    }

    fn show_load_error(&self) {
        debug!("grid load error");
    }

    async fn settle(&self, _name: &str) {}
}

struct LogViewer;

#[async_trait]
impl ViewerSurface for LogViewer {
    fn open(&self, slides: &[Slide], index: usize) {
        debug!(slides = slides.len(), index, "viewer open");
    }

    fn close(&self) {
        debug!("viewer close");
    }

    fn register_button(&self, button: ViewerButton, title: &str, label: &str) {
        debug!(?button, title, label, "viewer button registered");
    }

    fn set_button_label(&self, button: ViewerButton, label: &str) {
        debug!(?button, label, "viewer button label");
    }

    fn set_favorite_active(&self, active: bool) {
        debug!(active, "viewer favorite state");
    }

    fn fill_url_field(&self, url: &str) {
        info!(url, "URL placed in input field");
    }

    async fn copy_to_clipboard(&self, _text: &str) -> Result<()> {
        Err(anyhow::anyhow!("no clipboard in headless mode"))
    }
}

struct LogStatus;

impl StatusSink for LogStatus {
    fn status(&self, kind: StatusKind, text: &str) {
        info!(?kind, "{}", text);
    }

    fn alert(&self, text: &str) {
        info!("{}", text);
    }

    fn confirm(&self, prompt: &str) -> bool {
        // Non-interactive: destructive actions are always declined.
        info!(prompt, "confirmation declined (headless)");
        false
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = config::load(Some(&args.config))?;

    let base_url = Url::parse(&cfg.server.api_base_url)?;
    let client = Arc::new(HttpLibraryClient::new(base_url));
    let app = GalleryApp::new(
        client,
        Arc::new(LogGrid),
        Arc::new(LogViewer),
        Arc::new(LogStatus),
        &cfg,
    );

    info!("activating gallery session");
    app.activate().await?;

    let records = app.catalog().snapshot();
    let favorites = records.iter().filter(|r| r.favorite()).count();
    let viewed = records.iter().filter(|r| r.viewed()).count();
    info!(
        total = records.len(),
        favorites,
        viewed,
        has_more = app.loader().has_more(),
        "first page loaded"
    );
    Ok(())
}
