//! Error types for rs-mangapages.
//!
//! Almost everything that can go wrong during page resolution is soft:
//! a strategy that cannot decode a block, a malformed Base64 payload, or a
//! sabotage URL all degrade to "no candidate" and resolution continues.
//! The only hard failure surfaced to callers is an unusable chapter URL.

/// Error type for page resolution operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The chapter URL could not be parsed as an absolute HTTP(S) URL.
    ///
    /// The chapter URL is recorded on every emitted page and serves as the
    /// base for resolving relative image paths, so resolution cannot start
    /// without a valid one.
    #[error("invalid chapter URL {url:?}: {source}")]
    InvalidChapterUrl {
        /// The offending URL string.
        url: String,
        /// The underlying parse failure.
        #[source]
        source: url::ParseError,
    },
}

/// Result type alias for page resolution operations.
pub type Result<T> = std::result::Result<T, Error>;
