//! Client-side state and synchronization layer for a remote media gallery.
//!
//! The crate owns the session state — paginated catalog of media records,
//! viewport-driven viewed tracking, and a full-screen viewer session kept
//! consistent with the grid — while the actual rendering surfaces (grid,
//! viewer widget, status line) are traits implemented by the hosting shell.

pub mod app;
pub mod catalog;
pub mod config;
pub mod lightbox;
pub mod loader;
pub mod model;
pub mod remote;
pub mod surface;
pub mod sync;
pub mod viewport;
