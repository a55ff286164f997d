//! State for the preview modal.
//!
//! A [PreviewSession] tracks one opened entry: its category and where loading has got to.
//! [PreviewSlot] owns the single live session and talks to the fetch worker. Opening replaces the
//! session, closing drops it, and worker responses are only applied if their request id is the
//! live session's.

use crate::core::worker::{WorkerResponse, WorkerTask, Workers};
use crate::core::{Entry, FetchError, FetchedBody, PreviewCategory, classify_entry};

use thiserror::Error;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Largest text preview kept in memory (100 KiB). Anything beyond is dropped.
pub const TEXT_PREVIEW_MAX_BYTES: usize = 100 * 1024;

/// Caller-side mistakes when opening a preview.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("'{name}' has no preview")]
    NotPreviewable { name: String },
}

/// What a loaded preview shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewContent {
    /// Media shown by the front end straight from the href.
    Reference(String),
    /// Fetched text, possibly cut at [TEXT_PREVIEW_MAX_BYTES].
    Text {
        text: String,
        total_bytes: Option<u64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewStatus {
    Idle,
    Loading,
    Loaded {
        content: PreviewContent,
        truncated: bool,
    },
    Failed(FetchError),
}

/// One opened preview.
#[derive(Debug)]
pub struct PreviewSession {
    entry: Entry,
    category: PreviewCategory,
    status: PreviewStatus,
    request_id: u64,
    cancel: Option<Arc<AtomicBool>>,
}

impl PreviewSession {
    /// Creates an idle session for `entry`.
    ///
    /// # Errors
    /// [PreviewError::NotPreviewable] for directories, the parent link and files without a
    /// preview category. Callers should only offer previews for previewable entries.
    pub fn new(entry: Entry) -> Result<Self, PreviewError> {
        let category = classify_entry(&entry);
        if !category.is_previewable() {
            return Err(PreviewError::NotPreviewable {
                name: entry.name().to_string(),
            });
        }
        Ok(Self {
            entry,
            category,
            status: PreviewStatus::Idle,
            request_id: 0,
            cancel: None,
        })
    }

    // Getters / Accessors

    #[inline]
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    #[inline]
    pub fn category(&self) -> PreviewCategory {
        self.category
    }

    #[inline]
    pub fn status(&self) -> &PreviewStatus {
        &self.status
    }

    #[inline]
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    pub fn is_loading(&self) -> bool {
        self.status == PreviewStatus::Loading
    }

    /// Moves an idle session forward.
    ///
    /// Media categories are loaded at once by reference. Text issues one fetch on the worker and
    /// waits in [PreviewStatus::Loading].
    fn begin(&mut self, request_id: u64, workers: &Workers) {
        self.request_id = request_id;

        if self.category.is_media() {
            self.status = PreviewStatus::Loaded {
                content: PreviewContent::Reference(self.entry.href().to_string()),
                truncated: false,
            };
            return;
        }

        let cancel = Arc::new(AtomicBool::new(false));
        let task = WorkerTask::FetchText {
            href: self.entry.href().to_string(),
            limit: TEXT_PREVIEW_MAX_BYTES,
            cancel: Arc::clone(&cancel),
            request_id,
        };

        self.status = match workers.fetch_tx().send(task) {
            Ok(()) => PreviewStatus::Loading,
            Err(_) => PreviewStatus::Failed(FetchError::Transport(
                "preview worker is not running".to_string(),
            )),
        };
        self.cancel = Some(cancel);
    }

    fn finish(&mut self, result: Result<FetchedBody, FetchError>) {
        self.cancel = None;
        self.status = match result {
            Ok(body) => {
                let total_bytes = body.total_len();
                let (text, truncated) = truncate_text(body.into_bytes(), TEXT_PREVIEW_MAX_BYTES);
                PreviewStatus::Loaded {
                    content: PreviewContent::Text { text, total_bytes },
                    truncated,
                }
            }
            Err(e) => PreviewStatus::Failed(e),
        };
    }

    fn cancel_fetch(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.store(true, Ordering::Release);
        }
    }
}

/// Owner of the single live preview.
#[derive(Debug, Default)]
pub struct PreviewSlot {
    session: Option<PreviewSession>,
    request_id: u64,
}

impl PreviewSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&PreviewSession> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Opens a preview for `entry`, closing whatever was open before.
    ///
    /// # Errors
    /// [PreviewError::NotPreviewable] if the entry has no preview category. The previous
    /// session is closed either way.
    pub fn open(
        &mut self,
        entry: &Entry,
        workers: &Workers,
    ) -> Result<&PreviewSession, PreviewError> {
        self.close();

        let mut session = PreviewSession::new(entry.clone())?;
        self.request_id = self.request_id.wrapping_add(1);
        session.begin(self.request_id, workers);

        tracing::debug!(
            name = entry.name(),
            category = %session.category(),
            request_id = self.request_id,
            "preview opened"
        );
        Ok(&*self.session.insert(session))
    }

    /// Closes the live session and cancels its fetch, if any.
    pub fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.cancel_fetch();
            tracing::debug!(request_id = session.request_id(), "preview closed");
        }
    }

    /// Applies a worker response to the live session.
    ///
    /// # Returns
    /// `true` if the response belonged to the live, still loading session and was applied.
    /// Anything else is discarded.
    pub fn apply(&mut self, response: WorkerResponse) -> bool {
        let WorkerResponse::TextFetched { result, request_id } = response;

        match self.session.as_mut() {
            Some(session) if session.request_id() == request_id && session.is_loading() => {
                session.finish(result);
                true
            }
            _ => {
                tracing::debug!(request_id, "discarding stale preview response");
                false
            }
        }
    }
}

/// Cuts `bytes` to `limit` and decodes them.
///
/// A multi-byte character split by the cut is dropped rather than shown as a replacement
/// character. Other invalid UTF-8 is decoded lossily.
fn truncate_text(mut bytes: Vec<u8>, limit: usize) -> (String, bool) {
    let truncated = bytes.len() > limit;
    if truncated {
        bytes.truncate(limit);
        if let Err(e) = std::str::from_utf8(&bytes)
            && e.error_len().is_none()
        {
            bytes.truncate(e.valid_up_to());
        }
    }

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    (text, truncated)
}
