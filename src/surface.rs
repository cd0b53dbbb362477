//! Ports to the rendering shell.
//!
//! The state layer never touches a concrete widget tree. Whatever hosts it
//! (a DOM binding, a native toolkit, a headless harness) implements these
//! traits; the crate drives them and receives visibility/click events back
//! through [`crate::app::GalleryApp`].

use crate::lightbox::Slide;
use crate::model::MediaRecord;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerButton {
    CopyLink,
    Favorite,
}

/// The grid of rendered media elements.
#[async_trait]
pub trait GridSurface: Send + Sync {
    /// Materialize an element for the record and begin observing its
    /// visibility. Elements appear in call order.
    fn insert(&self, record: &Arc<MediaRecord>);

    /// Drop every rendered element.
    fn clear(&self);

    /// Apply the viewed visual state to an element.
    fn set_viewed(&self, name: &str);

    /// Apply or remove the favorite visual state.
    fn set_favorite(&self, name: &str, favorite: bool);

    /// Stop delivering visibility events for an element.
    fn unobserve(&self, name: &str);

    /// Show or hide the loading indicator.
    fn set_loading(&self, visible: bool);

    /// Replace the loading indicator with an error message.
    fn show_load_error(&self);

    /// Resolves once the element's media finished its initial decode or
    /// metadata load. Callers bound the wait; a slow asset must not block a
    /// page forever.
    async fn settle(&self, name: &str);
}

/// The full-screen viewer widget.
#[async_trait]
pub trait ViewerSurface: Send + Sync {
    fn open(&self, slides: &[Slide], index: usize);

    fn close(&self);

    /// Register a custom UI button. Called once per viewer instance.
    fn register_button(&self, button: ViewerButton, title: &str, label: &str);

    fn set_button_label(&self, button: ViewerButton, label: &str);

    /// Active/inactive styling of the favorite button.
    fn set_favorite_active(&self, active: bool);

    /// Fallback target when the clipboard is unavailable: a visible input
    /// field the URL is placed into.
    fn fill_url_field(&self, url: &str);

    async fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

/// Status line, alerts, and destructive-action confirmation.
pub trait StatusSink: Send + Sync {
    fn status(&self, kind: StatusKind, text: &str);

    fn alert(&self, text: &str);

    fn confirm(&self, prompt: &str) -> bool;
}
