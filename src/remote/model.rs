use serde::Deserialize;

/// Result of one library sync pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SyncOutcome {
    #[serde(default)]
    pub added: i64,
    #[serde(default)]
    pub removed: i64,
}

impl SyncOutcome {
    pub fn changed(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

/// One entry of a media listing page, as the service reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub viewed: bool,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct ToggleFavoriteResponse {
    pub status: String,
    #[serde(default)]
    pub favorite: bool,
}

#[derive(Debug, Deserialize)]
pub struct StartDownloadResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteViewedResponse {
    pub deleted: u64,
}
