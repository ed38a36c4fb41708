#![allow(dead_code)]

pub mod config_env;

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Notify;

use drivestream::drive::{DriveError, DriveFile, FilePage, FileSource};
use drivestream::listing::ListingEvent;

pub fn video_file(id: &str, name: &str) -> DriveFile {
    DriveFile {
        id: id.to_string(),
        name: name.to_string(),
        mime_type: "video/x-matroska".to_string(),
        size: Some(1024),
        icon_link: None,
    }
}

pub fn folder(id: &str, name: &str) -> DriveFile {
    DriveFile {
        id: id.to_string(),
        name: name.to_string(),
        mime_type: "application/vnd.google-apps.folder".to_string(),
        size: None,
        icon_link: None,
    }
}

pub fn page(files: Vec<DriveFile>, next: Option<&str>) -> FilePage {
    FilePage {
        files,
        next_page_token: next.map(String::from),
    }
}

/// Scripted listing source.
///
/// Responses are queued per query and served in order; a query can also be
/// gated so its next response is held back until the test releases it,
/// which is how the in-flight and late-response scenarios are driven.
#[derive(Default)]
pub struct MockFileSource {
    responses: Mutex<HashMap<String, VecDeque<Result<FilePage, DriveError>>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl MockFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, query: &str, page: FilePage) {
        self.push(query, Ok(page));
    }

    pub fn push_error(&self, query: &str, error: DriveError) {
        self.push(query, Err(error));
    }

    /// Holds the next response for `query` until the gate is notified.
    pub fn gate_query(&self, query: &str, gate: Arc<Notify>) {
        self.gates
            .lock()
            .expect("gates lock")
            .insert(query.to_string(), gate);
    }

    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    fn push(&self, query: &str, response: Result<FilePage, DriveError>) {
        self.responses
            .lock()
            .expect("responses lock")
            .entry(query.to_string())
            .or_default()
            .push_back(response);
    }
}

#[async_trait]
impl FileSource for MockFileSource {
    async fn list(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<FilePage, DriveError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((query.to_string(), page_token.map(String::from)));

        // Take the response before parking on the gate so concurrent
        // sessions never steal each other's scripted pages.
        let response = self
            .responses
            .lock()
            .expect("responses lock")
            .get_mut(query)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| Err(DriveError::Network("mock: no scripted response".into())));

        let gate = self.gates.lock().expect("gates lock").remove(query);
        if let Some(gate) = gate {
            gate.notified().await;
        }

        response
    }
}

/// Receives the next listing event or panics after a second.
pub async fn next_event(events: &mut UnboundedReceiver<ListingEvent>) -> ListingEvent {
    tokio::time::timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("timed out waiting for listing event")
        .expect("event channel closed")
}
