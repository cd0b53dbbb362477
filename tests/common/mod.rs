#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use gallerist::config::{self, Config};
use gallerist::lightbox::Slide;
use gallerist::model::MediaRecord;
use gallerist::remote::model::{FileEntry, PageResponse, SyncOutcome};
use gallerist::remote::LibraryService;
use gallerist::surface::{GridSurface, StatusKind, StatusSink, ViewerButton, ViewerSurface};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn entry(name: &str, width: i64, height: i64) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        favorite: false,
        viewed: false,
        width,
        height,
    }
}

pub fn test_config(page_size: u32) -> Config {
    let mut cfg: Config = serde_yaml::from_str(config::example()).unwrap();
    cfg.gallery.page_size = page_size;
    cfg.gallery.settle_ms = 100;
    cfg.polling.poll_interval_ms = 50;
    cfg.polling.poll_max_attempts = 3;
    cfg
}

/// Recording stand-in for the library service: queued responses, logged
/// calls, optional artificial listing latency.
#[derive(Default)]
pub struct RecordingLibrary {
    pub pages: Mutex<VecDeque<Result<PageResponse>>>,
    pub sync_results: Mutex<VecDeque<Result<SyncOutcome>>>,
    pub toggle_results: Mutex<VecDeque<Result<bool>>>,
    pub download_results: Mutex<VecDeque<Result<String>>>,
    pub delete_results: Mutex<VecDeque<Result<u64>>>,
    pub list_calls: Mutex<Vec<(u32, u32, bool)>>,
    pub viewed_calls: Mutex<Vec<String>>,
    pub toggle_calls: Mutex<Vec<String>>,
    pub download_calls: Mutex<Vec<(String, u32)>>,
    pub delete_calls: AtomicU32,
    pub sync_calls: AtomicU32,
    pub list_delay: Mutex<Option<Duration>>,
}

impl RecordingLibrary {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_page(&self, files: Vec<FileEntry>, has_more: bool) {
        self.pages
            .lock()
            .unwrap()
            .push_back(Ok(PageResponse { files, has_more }));
    }

    pub fn push_page_err(&self, msg: &str) {
        self.pages.lock().unwrap().push_back(Err(anyhow!("{}", msg)));
    }

    pub fn push_sync(&self, added: i64, removed: i64) {
        self.sync_results
            .lock()
            .unwrap()
            .push_back(Ok(SyncOutcome { added, removed }));
    }

    pub fn push_sync_err(&self, msg: &str) {
        self.sync_results
            .lock()
            .unwrap()
            .push_back(Err(anyhow!("{}", msg)));
    }

    pub fn push_toggle(&self, result: Result<bool>) {
        self.toggle_results.lock().unwrap().push_back(result);
    }

    pub fn push_download(&self, result: Result<String>) {
        self.download_results.lock().unwrap().push_back(result);
    }

    pub fn push_delete(&self, result: Result<u64>) {
        self.delete_results.lock().unwrap().push_back(result);
    }

    pub fn set_list_delay(&self, delay: Duration) {
        *self.list_delay.lock().unwrap() = Some(delay);
    }

    pub fn list_call_pages(&self) -> Vec<u32> {
        self.list_calls.lock().unwrap().iter().map(|c| c.0).collect()
    }

    pub fn viewed(&self) -> Vec<String> {
        self.viewed_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LibraryService for RecordingLibrary {
    async fn sync(&self) -> Result<SyncOutcome> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        self.sync_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SyncOutcome::default()))
    }

    async fn list_page(&self, page: u32, limit: u32, favorites_only: bool) -> Result<PageResponse> {
        self.list_calls
            .lock()
            .unwrap()
            .push((page, limit, favorites_only));
        let delay = *self.list_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.pages.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(PageResponse {
                files: Vec::new(),
                has_more: false,
            })
        })
    }

    async fn toggle_favorite(&self, name: &str) -> Result<bool> {
        self.toggle_calls.lock().unwrap().push(name.to_string());
        self.toggle_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(true))
    }

    async fn mark_viewed(&self, name: &str) -> Result<()> {
        self.viewed_calls.lock().unwrap().push(name.to_string());
        Ok(())
    }

    async fn start_download(&self, url: &str, depth: u32) -> Result<String> {
        self.download_calls
            .lock()
            .unwrap()
            .push((url.to_string(), depth));
        self.download_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Download started".to_string()))
    }

    async fn delete_viewed(&self) -> Result<u64> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.delete_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(0))
    }
}

#[derive(Default)]
pub struct MockGrid {
    pub inserted: Mutex<Vec<String>>,
    pub clears: AtomicU32,
    pub viewed: Mutex<Vec<String>>,
    pub favorites: Mutex<Vec<(String, bool)>>,
    pub unobserved: Mutex<Vec<String>>,
    pub loading: Mutex<Vec<bool>>,
    pub load_errors: AtomicU32,
    pub settle_delay: Mutex<Option<Duration>>,
}

impl MockGrid {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inserted_names(&self) -> Vec<String> {
        self.inserted.lock().unwrap().clone()
    }

    pub fn set_settle_delay(&self, delay: Duration) {
        *self.settle_delay.lock().unwrap() = Some(delay);
    }

    pub fn last_favorite(&self, name: &str) -> Option<bool> {
        self.favorites
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }
}

#[async_trait]
impl GridSurface for MockGrid {
    fn insert(&self, record: &Arc<MediaRecord>) {
        self.inserted.lock().unwrap().push(record.name.clone());
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inserted.lock().unwrap().clear();
    }

    fn set_viewed(&self, name: &str) {
        self.viewed.lock().unwrap().push(name.to_string());
    }

    fn set_favorite(&self, name: &str, favorite: bool) {
        self.favorites
            .lock()
            .unwrap()
            .push((name.to_string(), favorite));
    }

    fn unobserve(&self, name: &str) {
        self.unobserved.lock().unwrap().push(name.to_string());
    }

    fn set_loading(&self, visible: bool) {
        self.loading.lock().unwrap().push(visible);
    }

    fn show_load_error(&self) {
        self.load_errors.fetch_add(1, Ordering::SeqCst);
    }

    async fn settle(&self, _name: &str) {
        let delay = *self.settle_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[derive(Default)]
pub struct MockViewer {
    pub opens: Mutex<Vec<(usize, usize)>>,
    pub last_slides: Mutex<Option<Vec<Slide>>>,
    pub closes: AtomicU32,
    pub registered: Mutex<Vec<(ViewerButton, String)>>,
    pub labels: Mutex<Vec<(ViewerButton, String)>>,
    pub favorite_active: Mutex<Vec<bool>>,
    pub clipboard: Mutex<Vec<String>>,
    pub clipboard_fails: AtomicBool,
    pub url_field: Mutex<Option<String>>,
}

impl MockViewer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn last_label(&self, button: ViewerButton) -> Option<String> {
        self.labels
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(b, _)| *b == button)
            .map(|(_, l)| l.clone())
    }

    pub fn last_favorite_active(&self) -> Option<bool> {
        self.favorite_active.lock().unwrap().last().copied()
    }
}

#[async_trait]
impl ViewerSurface for MockViewer {
    fn open(&self, slides: &[Slide], index: usize) {
        self.opens.lock().unwrap().push((slides.len(), index));
        *self.last_slides.lock().unwrap() = Some(slides.to_vec());
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }

    fn register_button(&self, button: ViewerButton, _title: &str, label: &str) {
        self.registered
            .lock()
            .unwrap()
            .push((button, label.to_string()));
    }

    fn set_button_label(&self, button: ViewerButton, label: &str) {
        self.labels.lock().unwrap().push((button, label.to_string()));
    }

    fn set_favorite_active(&self, active: bool) {
        self.favorite_active.lock().unwrap().push(active);
    }

    fn fill_url_field(&self, url: &str) {
        *self.url_field.lock().unwrap() = Some(url.to_string());
    }

    async fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        if self.clipboard_fails.load(Ordering::SeqCst) {
            return Err(anyhow!("clipboard unavailable"));
        }
        self.clipboard.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockStatus {
    pub statuses: Mutex<Vec<(StatusKind, String)>>,
    pub alerts: Mutex<Vec<String>>,
    pub confirm_answer: AtomicBool,
}

impl MockStatus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn texts(&self) -> Vec<String> {
        self.statuses
            .lock()
            .unwrap()
            .iter()
            .map(|(_, t)| t.clone())
            .collect()
    }
}

impl StatusSink for MockStatus {
    fn status(&self, kind: StatusKind, text: &str) {
        self.statuses.lock().unwrap().push((kind, text.to_string()));
    }

    fn alert(&self, text: &str) {
        self.alerts.lock().unwrap().push(text.to_string());
    }

    fn confirm(&self, _prompt: &str) -> bool {
        self.confirm_answer.load(Ordering::SeqCst)
    }
}
