//! Per-query listing state: accumulated entries, cursor, and fetch flags.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::drive::types::{DriveFile, FilePage};

#[derive(Default)]
struct SessionFields {
    entries: Vec<DriveFile>,
    cursor: Option<String>,
    is_last_page: bool,
    has_loaded_once: bool,
    has_failed: bool,
}

/// Pagination state for one query.
///
/// The atomic flag is the fetch lock: compare-and-set keeps concurrent
/// triggers from issuing duplicate page requests. The remaining fields sit
/// behind the mutex and are only written by the fetch holding the flag.
/// Switching queries means dropping the session and creating a new one;
/// nothing is ever merged across sessions.
pub struct ListingSession {
    id: Uuid,
    query: String,
    in_flight: AtomicBool,
    fields: Mutex<SessionFields>,
}

impl ListingSession {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.into(),
            in_flight: AtomicBool::new(false),
            fields: Mutex::new(SessionFields::default()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Claims the fetch lock. False means a fetch is already running and
    /// the caller must back off without touching the session.
    pub fn try_begin_fetch(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Releases the fetch lock.
    pub fn end_fetch(&self) {
        self.in_flight.store(false, Ordering::Release);
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Appends one page of results and advances the cursor.
    ///
    /// Returns a snapshot of the accumulated list for emission. An absent
    /// or empty next token marks the last page; the flag never reverts.
    pub fn apply_page(&self, page: FilePage) -> Vec<DriveFile> {
        let mut fields = self.lock_fields();
        fields.entries.extend(page.files);

        let next = page.next_page_token.filter(|token| !token.is_empty());
        if next.is_none() {
            fields.is_last_page = true;
        }
        fields.cursor = next;
        fields.has_failed = false;
        fields.has_loaded_once = true;
        fields.entries.clone()
    }

    /// Records a failed fetch. The cursor stays put so a retry resumes at
    /// the same page instead of restarting.
    pub fn record_failure(&self) {
        let mut fields = self.lock_fields();
        fields.has_failed = true;
        fields.has_loaded_once = true;
    }

    pub fn cursor(&self) -> Option<String> {
        self.lock_fields().cursor.clone()
    }

    pub fn snapshot(&self) -> Vec<DriveFile> {
        self.lock_fields().entries.clone()
    }

    pub fn entry(&self, index: usize) -> Option<DriveFile> {
        self.lock_fields().entries.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock_fields().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.lock_fields().is_last_page
    }

    pub fn has_loaded_once(&self) -> bool {
        self.lock_fields().has_loaded_once
    }

    pub fn has_failed(&self) -> bool {
        self.lock_fields().has_failed
    }

    fn lock_fields(&self) -> MutexGuard<'_, SessionFields> {
        match self.fields.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::error!("Listing session lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}
