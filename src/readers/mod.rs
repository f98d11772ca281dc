pub mod feed_reader;
pub mod layout;

pub use feed_reader::FeedReader;
pub use layout::{FeedLayout, FeedVariant, AWS_MINUTE_LAYOUT, SYNOPTIC_LAYOUT};
