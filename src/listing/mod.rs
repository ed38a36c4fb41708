pub mod fetcher;
pub mod scroll;
pub mod session;
pub mod state;

pub use fetcher::PageFetcher;
pub use scroll::should_fetch_next;
pub use session::ListingSession;
pub use state::{ListingEvent, ListingState};
