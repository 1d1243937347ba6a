//! Networking abstractions for feed acquisition.

pub mod traits;

pub use traits::FeedFetcher;
