//! Top-level wiring and the user-facing gallery operations.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::lightbox::LightboxController;
use crate::loader::PageLoader;
use crate::remote::LibraryService;
use crate::surface::{GridSurface, StatusKind, StatusSink, ViewerSurface};
use crate::sync::SyncOrchestrator;
use crate::viewport::ViewTracker;
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Owns every component of a gallery session and exposes the operations the
/// shell's controls map onto: activation, refresh, favorites filter, scroll
/// triggers, item opening, download submission, and bulk delete.
pub struct GalleryApp {
    catalog: Arc<Catalog>,
    client: Arc<dyn LibraryService>,
    status: Arc<dyn StatusSink>,
    loader: PageLoader,
    tracker: Arc<ViewTracker>,
    lightbox: Arc<LightboxController>,
    sync: Arc<SyncOrchestrator>,
    favorites_only: AtomicBool,
}

impl GalleryApp {
    pub fn new(
        client: Arc<dyn LibraryService>,
        grid: Arc<dyn GridSurface>,
        viewer: Arc<dyn ViewerSurface>,
        status: Arc<dyn StatusSink>,
        cfg: &Config,
    ) -> Self {
        let catalog = Arc::new(Catalog::new());
        let tracker = Arc::new(ViewTracker::new(
            Arc::clone(&catalog),
            Arc::clone(&client),
            Arc::clone(&grid),
        ));
        let loader = PageLoader::new(
            Arc::clone(&client),
            Arc::clone(&catalog),
            Arc::clone(&grid),
            cfg.gallery.page_size,
            Duration::from_millis(cfg.gallery.settle_ms),
        );
        let lightbox = Arc::new(LightboxController::new(
            Arc::clone(&catalog),
            Arc::clone(&client),
            Arc::clone(&grid),
            viewer,
            Arc::clone(&tracker),
            cfg.server.media_base_url.clone(),
            cfg.links.artwork_base_url.clone(),
            cfg.gallery.default_dimension,
        ));
        let sync = Arc::new(SyncOrchestrator::new(
            Arc::clone(&client),
            Arc::clone(&status),
            Duration::from_millis(cfg.polling.poll_interval_ms),
            cfg.polling.poll_max_attempts,
        ));
        Self {
            catalog,
            client,
            status,
            loader,
            tracker,
            lightbox,
            sync,
            favorites_only: AtomicBool::new(false),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn loader(&self) -> &PageLoader {
        &self.loader
    }

    pub fn lightbox(&self) -> &Arc<LightboxController> {
        &self.lightbox
    }

    pub fn sync(&self) -> &Arc<SyncOrchestrator> {
        &self.sync
    }

    pub fn favorites_only(&self) -> bool {
        self.favorites_only.load(Ordering::Relaxed)
    }

    async fn reload(&self) -> Result<()> {
        self.loader
            .load_page(true, self.favorites_only())
            .await
            .map(|_| ())
    }

    /// Initial page activation: sync once, then load page 1 from scratch.
    pub async fn activate(&self) -> Result<()> {
        self.sync.sync_now().await;
        self.reload().await
    }

    /// Manual refresh: sync, then full reload.
    pub async fn refresh(&self) -> Result<()> {
        self.sync.sync_now().await;
        self.reload().await
    }

    /// Favorites-filter change: full reload without a pre-reload sync.
    pub async fn set_favorites_filter(&self, favorites_only: bool) -> Result<()> {
        self.favorites_only.store(favorites_only, Ordering::Relaxed);
        self.reload().await
    }

    /// The sentinel footer became visible: request the next page. The
    /// loader refuses on its own while a load is in flight or the end was
    /// reached.
    pub async fn on_footer_visible(&self) -> Result<()> {
        self.loader
            .load_page(false, self.favorites_only())
            .await
            .map(|_| ())
    }

    /// A grid element crossed the visibility threshold.
    pub async fn on_item_visible(&self, name: &str) {
        self.tracker.on_item_visible(name).await;
    }

    /// A grid element was clicked: open the viewer at its position.
    pub async fn open_item(&self, name: &str) {
        if let Some(index) = self.catalog.index_of(name) {
            self.lightbox.open(index).await;
        }
    }

    /// Download form submitted. An empty URL silently aborts. On success
    /// the post-download watch starts (cancelling any previous one).
    pub async fn submit_download(&self, url: &str, depth: u32) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }
        self.status.status(StatusKind::Info, "Starting download...");
        match self.client.start_download(url, depth).await {
            Ok(message) => {
                self.status.status(StatusKind::Success, &message);
                self.sync.start_download_watch();
            }
            Err(err) => {
                warn!(?err, "start-download failed");
                self.status
                    .status(StatusKind::Error, "Error starting download");
            }
        }
    }

    /// Bulk-delete viewed non-favorites, gated by an explicit confirmation.
    /// Reports the deleted count, then syncs and reloads from page 1.
    pub async fn delete_viewed(&self) -> Result<()> {
        if !self
            .status
            .confirm("Delete all viewed images that are not favorites?")
        {
            return Ok(());
        }
        match self.client.delete_viewed().await {
            Ok(deleted) => {
                self.status.alert(&format!("Deleted {} images.", deleted));
                self.refresh().await
            }
            Err(err) => {
                warn!(?err, "delete-viewed failed");
                self.status.alert("Error deleting.");
                Ok(())
            }
        }
    }
}
