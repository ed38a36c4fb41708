use crate::drive::error::DriveError;
use crate::drive::types::FilePage;

/// The remote listing call as the fetcher sees it.
///
/// `page_token` of `None` requests the first page. The production
/// implementation is [`crate::drive::DriveClient`]; tests script their own.
#[async_trait::async_trait]
pub trait FileSource: Send + Sync {
    async fn list(&self, query: &str, page_token: Option<&str>)
        -> Result<FilePage, DriveError>;
}
