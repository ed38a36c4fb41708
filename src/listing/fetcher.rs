//! Page fetching with in-flight deduplication and state emission.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::drive::source::FileSource;
use crate::listing::session::ListingSession;
use crate::listing::state::{ListingEvent, ListingState};

/// Fetches pages for listing sessions and emits state changes on a channel.
///
/// Cheap to clone and share; mutual exclusion lives in each session's own
/// in-flight flag, so concurrent triggers for the same session collapse to
/// a single request.
#[derive(Clone)]
pub struct PageFetcher {
    source: Arc<dyn FileSource>,
    events: mpsc::UnboundedSender<ListingEvent>,
}

impl PageFetcher {
    /// Returns the fetcher plus the receiving end of its state channel.
    /// Dropping the receiver unsubscribes; emissions then become no-ops.
    pub fn new(source: Arc<dyn FileSource>) -> (Self, mpsc::UnboundedReceiver<ListingEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (Self { source, events }, rx)
    }

    /// Fetches the next page for `session`.
    ///
    /// A no-op when a fetch for this session is already in flight: no state
    /// is mutated and nothing is emitted. Otherwise emits `Loading`, then
    /// exactly one of `Success`/`Error`. On error the cursor is left
    /// untouched so a retry resumes at the same page.
    pub async fn fetch(&self, session: &Arc<ListingSession>) {
        if !session.try_begin_fetch() {
            debug!("Fetch already in flight for session {}, skipping", session.id());
            return;
        }

        self.emit(session, ListingState::Loading);

        let cursor = session.cursor();
        let result = self.source.list(session.query(), cursor.as_deref()).await;

        let state = match result {
            Ok(page) => {
                debug!(
                    "Fetched {} entries for session {} (last page: {})",
                    page.files.len(),
                    session.id(),
                    page.next_page_token.is_none()
                );
                ListingState::Success(session.apply_page(page))
            }
            Err(err) => {
                warn!("Listing fetch failed for session {}: {}", session.id(), err);
                session.record_failure();
                ListingState::Error(err.to_string())
            }
        };

        // Release the lock before emitting so a consumer reacting to the
        // terminal state can immediately trigger a retry.
        session.end_fetch();
        self.emit(session, state);
    }

    fn emit(&self, session: &Arc<ListingSession>, state: ListingState) {
        // Send fails only once the receiver is gone (screen teardown).
        let _ = self.events.send(ListingEvent {
            session: session.id(),
            state,
        });
    }
}
