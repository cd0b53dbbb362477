use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Filename patterns an external artwork id can be recovered from. The
/// bracket form is tried first; precedence matters for downstream deep links.
static BRACKET_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"_\[(\d+)").expect("bracket id pattern"));
static PAGE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)_p").expect("page id pattern"));

/// Extract the external artwork id from a media filename, if present.
pub fn extract_external_id(name: &str) -> Option<String> {
    BRACKET_ID
        .captures(name)
        .or_else(|| PAGE_ID.captures(name))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Derive the kind from the filename extension.
    pub fn from_name(name: &str) -> Self {
        let ext = name
            .rsplit('.')
            .next()
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "mp4" | "webm" => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, MediaKind::Video)
    }
}

/// One media file known to the client session.
///
/// Exactly one instance exists per name; the grid and the viewer hold the
/// same `Arc` handle, so the atomic flags below are visible to both views
/// the moment either one flips them.
#[derive(Debug)]
pub struct MediaRecord {
    pub name: String,
    pub kind: MediaKind,
    pub width: i64,
    pub height: i64,
    pub external_id: Option<String>,
    favorite: AtomicBool,
    viewed: AtomicBool,
}

impl MediaRecord {
    pub fn new(name: String, width: i64, height: i64, favorite: bool, viewed: bool) -> Self {
        let kind = MediaKind::from_name(&name);
        let external_id = extract_external_id(&name);
        Self {
            name,
            kind,
            width,
            height,
            external_id,
            favorite: AtomicBool::new(favorite),
            viewed: AtomicBool::new(viewed),
        }
    }

    pub fn favorite(&self) -> bool {
        self.favorite.load(Ordering::Relaxed)
    }

    pub fn set_favorite(&self, value: bool) {
        self.favorite.store(value, Ordering::Relaxed);
    }

    pub fn viewed(&self) -> bool {
        self.viewed.load(Ordering::Relaxed)
    }

    /// Flip `viewed` to true. Returns false when the record was already
    /// viewed — the flag never reverts within a session.
    pub fn mark_viewed(&self) -> bool {
        !self.viewed.swap(true, Ordering::Relaxed)
    }

    /// Natural dimensions, substituting `fallback` for any missing,
    /// non-positive, or absurdly large axis. Viewer layout requires
    /// positive dimensions.
    pub fn dimensions_or(&self, fallback: u32) -> (u32, u32) {
        let axis = |value: i64| match u32::try_from(value) {
            Ok(v) if v > 0 => v,
            _ => fallback,
        };
        (axis(self.width), axis(self.height))
    }
}
