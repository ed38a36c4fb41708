pub mod client;
pub mod error;
pub mod source;
pub mod types;

pub use client::DriveClient;
pub use error::DriveError;
pub use source::FileSource;
pub use types::{folder_query, DriveFile, FilePage};
