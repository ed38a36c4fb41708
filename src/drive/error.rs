use thiserror::Error;

/// Listing failures as shown to the user.
///
/// Both variants are retry-eligible; retry is always user-triggered.
#[derive(Debug, Error)]
pub enum DriveError {
    /// Transport-level failure: DNS, connect, timeout, broken body.
    #[error("network error: {0}")]
    Network(String),

    /// The drive endpoint answered with an error payload (auth,
    /// permission, bad query). Carries the remote message verbatim.
    #[error("{message}")]
    Remote { message: String },
}

impl DriveError {
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }
}
