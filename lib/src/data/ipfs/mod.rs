//! Media storage over IPFS

use async_trait::async_trait;
use thiserror::Error;

pub mod client;
#[cfg(any(test, feature = "mocks"))]
pub mod memory;

pub use client::IpfsClient;
#[cfg(any(test, feature = "mocks"))]
pub use memory::InMemoryMediaStore;

/// Error type for media storage operations
#[derive(Debug, Error)]
pub enum MediaStorageError {
    /// Network or transport-related errors
    #[error("Transport error: {0}")]
    Transport(String),

    /// The storage node answered with something unexpected
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Result type for media storage operations
pub type MediaResult<T> = Result<T, MediaStorageError>;

/// Content-addressed storage for property media
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store a file and return its content identifier
    async fn store(&self, filename: &str, bytes: Vec<u8>) -> MediaResult<String>;
}
