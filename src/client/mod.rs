pub mod kma_client;
pub mod source;

pub use kma_client::KmaClient;
pub use source::{FeedQuery, FeedSource};
