//! Full-screen viewer sessions.
//!
//! Builds slide descriptors from the catalog, owns the viewer lifecycle (at
//! most one open session), and mediates favorite/viewed mutations triggered
//! inside the viewer back into the catalog and the grid.

use crate::catalog::Catalog;
use crate::model::MediaRecord;
use crate::remote::LibraryService;
use crate::surface::{GridSurface, ViewerButton, ViewerSurface};
use crate::viewport::ViewTracker;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::warn;

/// Videos get a fixed layout box; their true dimensions are not used for
/// the controls frame.
pub const VIDEO_SLIDE_WIDTH: u32 = 1920;
pub const VIDEO_SLIDE_HEIGHT: u32 = 1080;

const COPY_LABEL: &str = "Copy Link";
const COPIED_LABEL: &str = "Copied!";
const PASTED_LABEL: &str = "Pasted to field";
const FAV_ON_LABEL: &str = "Liked";
const FAV_OFF_LABEL: &str = "Fav";
const LABEL_REVERT_AFTER: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideContent {
    Image {
        src: String,
        /// Low-res placeholder shown before the full source loads. May be
        /// identical to `src`.
        placeholder: String,
        width: u32,
        height: u32,
    },
    Video {
        src: String,
        width: u32,
        height: u32,
    },
}

/// One viewer slide. Carries the shared record handle, so the favorite and
/// viewed state the viewer reads can never diverge from the grid's.
#[derive(Clone)]
pub struct Slide {
    pub content: SlideContent,
    pub record: Arc<MediaRecord>,
}

impl Slide {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn external_id(&self) -> Option<&str> {
        self.record.external_id.as_deref()
    }

    pub fn favorite(&self) -> bool {
        self.record.favorite()
    }

    pub fn is_video(&self) -> bool {
        self.record.kind.is_video()
    }
}

struct Session {
    slides: Vec<Slide>,
    current: usize,
}

pub struct LightboxController {
    catalog: Arc<Catalog>,
    client: Arc<dyn LibraryService>,
    grid: Arc<dyn GridSurface>,
    viewer: Arc<dyn ViewerSurface>,
    tracker: Arc<ViewTracker>,
    /// Ends with a trailing slash; media sources are `<base><name>`.
    media_base_url: String,
    /// Ends with a trailing slash; deep links are `<base><external_id>`.
    artwork_base_url: String,
    default_dimension: u32,
    session: Mutex<Option<Session>>,
}

impl LightboxController {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        catalog: Arc<Catalog>,
        client: Arc<dyn LibraryService>,
        grid: Arc<dyn GridSurface>,
        viewer: Arc<dyn ViewerSurface>,
        tracker: Arc<ViewTracker>,
        media_base_url: String,
        artwork_base_url: String,
        default_dimension: u32,
    ) -> Self {
        Self {
            catalog,
            client,
            grid,
            viewer,
            tracker,
            media_base_url,
            artwork_base_url,
            default_dimension,
            session: Mutex::new(None),
        }
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().expect("session lock poisoned")
    }

    pub fn is_open(&self) -> bool {
        self.lock_session().is_some()
    }

    fn media_src(&self, name: &str) -> String {
        format!("{}{}", self.media_base_url, name)
    }

    /// Slide descriptors for every catalog record, in catalog order.
    pub fn build_slides(&self) -> Vec<Slide> {
        self.catalog
            .snapshot()
            .into_iter()
            .map(|record| {
                let src = self.media_src(&record.name);
                let content = if record.kind.is_video() {
                    SlideContent::Video {
                        src,
                        width: VIDEO_SLIDE_WIDTH,
                        height: VIDEO_SLIDE_HEIGHT,
                    }
                } else {
                    let (width, height) = record.dimensions_or(self.default_dimension);
                    SlideContent::Image {
                        placeholder: src.clone(),
                        src,
                        width,
                        height,
                    }
                };
                Slide { content, record }
            })
            .collect()
    }

    /// Open the viewer at `index`. Any previously open session is torn down
    /// first; the custom buttons are registered once per instance.
    pub async fn open(&self, index: usize) {
        if self.lock_session().take().is_some() {
            self.viewer.close();
        }

        let slides = self.build_slides();
        if index >= slides.len() {
            return;
        }

        self.viewer.open(&slides, index);
        self.viewer
            .register_button(ViewerButton::CopyLink, "Copy artwork link", COPY_LABEL);
        let favorite = slides[index].favorite();
        self.viewer.register_button(
            ViewerButton::Favorite,
            "Favorite",
            if favorite { FAV_ON_LABEL } else { FAV_OFF_LABEL },
        );

        *self.lock_session() = Some(Session {
            slides,
            current: index,
        });
        // Opening counts as a slide change for the first slide.
        self.slide_changed(index).await;
    }

    /// Viewer reported a slide change: refresh the favorite button from the
    /// record and mark the slide's media viewed through the shared path.
    pub async fn slide_changed(&self, index: usize) {
        let name = {
            let mut session = self.lock_session();
            let Some(session) = session.as_mut() else {
                return;
            };
            let Some(slide) = session.slides.get(index) else {
                return;
            };
            session.current = index;
            self.favorite_button(slide.favorite());
            slide.record.name.clone()
        };
        self.tracker.mark_viewed(&name).await;
    }

    fn current_record(&self) -> Option<Arc<MediaRecord>> {
        self.lock_session()
            .as_ref()
            .map(|session| Arc::clone(&session.slides[session.current].record))
    }

    fn favorite_button(&self, active: bool) {
        self.viewer.set_favorite_active(active);
        self.viewer.set_button_label(
            ViewerButton::Favorite,
            if active { FAV_ON_LABEL } else { FAV_OFF_LABEL },
        );
    }

    /// Push one favorite value to all three views at once: the shared
    /// record, the viewer button, and the grid element.
    fn apply_favorite(&self, record: &MediaRecord, value: bool) {
        record.set_favorite(value);
        self.favorite_button(value);
        self.grid.set_favorite(&record.name, value);
    }

    /// Favorite button clicked. The flip is optimistic: all views update
    /// immediately, then reconcile with the server's authoritative value.
    /// A failed request keeps the optimistic value (accepted inconsistency
    /// window until the next authoritative read).
    pub async fn favorite_clicked(&self) {
        let Some(record) = self.current_record() else {
            return;
        };
        let optimistic = !record.favorite();
        self.apply_favorite(&record, optimistic);

        match self.client.toggle_favorite(&record.name).await {
            Ok(authoritative) => self.apply_favorite(&record, authoritative),
            Err(err) => {
                warn!(?err, name = %record.name, "toggle-favorite failed; keeping optimistic state");
            }
        }
    }

    /// Copy-link button clicked. Prefers the external deep link; records
    /// without an external id fall back to their direct source URL so the
    /// action always yields something usable. Clipboard first, visible URL
    /// field when the clipboard is unavailable; either way the button label
    /// flashes a confirmation that reverts shortly after.
    pub async fn copy_link_clicked(&self) {
        let Some(record) = self.current_record() else {
            return;
        };
        let url = match &record.external_id {
            Some(id) => format!("{}{}", self.artwork_base_url, id),
            None => self.media_src(&record.name),
        };

        match self.viewer.copy_to_clipboard(&url).await {
            Ok(()) => self.flash_copy_label(COPIED_LABEL),
            Err(err) => {
                warn!(?err, "clipboard unavailable; placing URL in input field");
                self.viewer.fill_url_field(&url);
                self.flash_copy_label(PASTED_LABEL);
            }
        }
    }

    fn flash_copy_label(&self, label: &str) {
        self.viewer.set_button_label(ViewerButton::CopyLink, label);
        let viewer = Arc::clone(&self.viewer);
        tokio::spawn(async move {
            tokio::time::sleep(LABEL_REVERT_AFTER).await;
            viewer.set_button_label(ViewerButton::CopyLink, COPY_LABEL);
        });
    }

    /// Tear down the session. No further slide-change notifications are
    /// processed once this returns.
    pub fn close(&self) {
        if self.lock_session().take().is_some() {
            self.viewer.close();
        }
    }
}
