use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned while reading passage pools.
pub enum StoreError {
    /// Could not connect to the backing store.
    #[error("failed to connect to passage store at '{url}': {message}")]
    ConnectionFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// A pool query failed.
    #[error("failed to fetch {pool} passages for {key}: {message}")]
    FetchFailed {
        /// Chapter the fetch was for.
        key: String,
        /// Pool label.
        pool: String,
        /// Error message.
        message: String,
    },

    /// A record had no usable identifier.
    #[error("malformed passage record in '{collection}': {reason}")]
    MalformedRecord {
        /// Collection name.
        collection: String,
        /// What was wrong with it.
        reason: String,
    },
}
