//! Viewed tracking driven by element visibility.
//!
//! The shell reports when a grid element has crossed its visibility
//! threshold; marking is one-shot per record and the element is unobserved
//! on first fire. The viewer delegates to the same path, so opening a slide
//! satisfies the viewed invariant even for elements never scrolled past.

use crate::catalog::Catalog;
use crate::remote::LibraryService;
use crate::surface::GridSurface;
use std::sync::Arc;
use tracing::warn;

pub struct ViewTracker {
    catalog: Arc<Catalog>,
    client: Arc<dyn LibraryService>,
    grid: Arc<dyn GridSurface>,
}

impl ViewTracker {
    pub fn new(
        catalog: Arc<Catalog>,
        client: Arc<dyn LibraryService>,
        grid: Arc<dyn GridSurface>,
    ) -> Self {
        Self {
            catalog,
            client,
            grid,
        }
    }

    /// A grid element became sufficiently visible.
    pub async fn on_item_visible(&self, name: &str) {
        self.grid.unobserve(name);
        self.mark_viewed(name).await;
    }

    /// Mark a record viewed exactly once: flips the catalog flag, applies
    /// the visual state, and issues the remote request. Re-marking an
    /// already-viewed record is a no-op; a failed request is logged and
    /// swallowed (the local flag stays set).
    pub async fn mark_viewed(&self, name: &str) {
        let Some(record) = self.catalog.get(name) else {
            return;
        };
        if !record.mark_viewed() {
            return;
        }
        self.grid.set_viewed(name);
        if let Err(err) = self.client.mark_viewed(name).await {
            warn!(?err, name, "mark-viewed request failed");
        }
    }
}
