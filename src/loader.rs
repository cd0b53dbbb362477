//! Incremental page loading into the catalog.

use crate::catalog::Catalog;
use crate::model::MediaRecord;
use crate::remote::LibraryService;
use crate::surface::GridSurface;
use anyhow::Result;
use futures::future::join_all;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::timeout;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based page to request next.
    pub current_page: u32,
    pub has_more: bool,
    pub is_loading: bool,
}

impl PageState {
    fn fresh() -> Self {
        Self {
            current_page: 1,
            has_more: true,
            is_loading: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Appended this many records.
    Loaded(usize),
    /// Another load holds the guard; nothing was done.
    InFlight,
    /// End of the collection was already reached.
    EndReached,
}

/// Fetches pages, appends records to the catalog, and renders them.
///
/// The `is_loading` flag is the sole guard against overlapping fetches: it
/// is taken before the request goes out and released on every exit path.
pub struct PageLoader {
    client: Arc<dyn LibraryService>,
    catalog: Arc<Catalog>,
    grid: Arc<dyn GridSurface>,
    page_size: u32,
    settle_window: Duration,
    state: Mutex<PageState>,
}

impl PageLoader {
    pub fn new(
        client: Arc<dyn LibraryService>,
        catalog: Arc<Catalog>,
        grid: Arc<dyn GridSurface>,
        page_size: u32,
        settle_window: Duration,
    ) -> Self {
        Self {
            client,
            catalog,
            grid,
            page_size,
            settle_window,
            state: Mutex::new(PageState::fresh()),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().expect("page state lock poisoned")
    }

    pub fn state(&self) -> PageState {
        *self.lock_state()
    }

    pub fn has_more(&self) -> bool {
        self.lock_state().has_more
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading
    }

    /// Load the next page (or page 1 after a reset) and render it.
    ///
    /// A call while a load is in flight is a no-op, as is a non-reset call
    /// once the end of the collection was reached. On failure the catalog
    /// and pagination counters are left exactly as they were.
    pub async fn load_page(&self, reset: bool, favorites_only: bool) -> Result<LoadOutcome> {
        let page = {
            let mut state = self.lock_state();
            if state.is_loading {
                return Ok(LoadOutcome::InFlight);
            }
            if !reset && !state.has_more {
                return Ok(LoadOutcome::EndReached);
            }
            if reset {
                *state = PageState::fresh();
            }
            state.is_loading = true;
            state.current_page
        };

        if reset {
            self.catalog.clear();
            self.grid.clear();
        }
        self.grid.set_loading(true);

        let fetched = self.fetch_and_render(page, favorites_only).await;

        let mut state = self.lock_state();
        state.is_loading = false;
        match fetched {
            Ok((appended, has_more)) => {
                if has_more {
                    state.current_page += 1;
                } else {
                    state.has_more = false;
                    self.grid.set_loading(false);
                }
                info!(page, appended, has_more, "page loaded");
                Ok(LoadOutcome::Loaded(appended))
            }
            Err(err) => {
                self.grid.show_load_error();
                Err(err)
            }
        }
    }

    async fn fetch_and_render(
        &self,
        page: u32,
        favorites_only: bool,
    ) -> Result<(usize, bool)> {
        let response = self
            .client
            .list_page(page, self.page_size, favorites_only)
            .await?;
        let has_more = response.has_more;

        let mut appended = Vec::new();
        for entry in response.files {
            let record = MediaRecord::new(
                entry.name,
                entry.width,
                entry.height,
                entry.favorite,
                entry.viewed,
            );
            if let Some(record) = self.catalog.insert(record) {
                self.grid.insert(&record);
                appended.push(record);
            }
        }

        // Give each element a bounded window to finish its first decode so
        // one slow asset cannot stall a burst of scroll-triggered loads.
        // Timeouts and decode errors both count as settled.
        let settles = appended.iter().map(|record| async move {
            let _ = timeout(self.settle_window, self.grid.settle(&record.name)).await;
        });
        join_all(settles).await;

        Ok((appended.len(), has_more))
    }
}
