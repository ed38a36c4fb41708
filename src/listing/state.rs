use uuid::Uuid;

use crate::drive::types::DriveFile;

/// One step of a listing session's fetch cycle.
///
/// `Loading` always precedes exactly one of `Success`/`Error` per fetch;
/// no other ordering is emitted. A `Success` carries a snapshot of the
/// full accumulated list, not just the newly arrived page.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingState {
    Loading,
    Success(Vec<DriveFile>),
    Error(String),
}

/// A state change tagged with the session it belongs to.
///
/// The tag lets consumers drop late events from sessions they no longer
/// display after switching queries.
#[derive(Debug, Clone)]
pub struct ListingEvent {
    pub session: Uuid,
    pub state: ListingState,
}
