pub mod constants;
pub mod encoding;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use encoding::decode_feed_bytes;
pub use filename::{generate_csv_filename, generate_default_csv_path};
pub use progress::ProgressReporter;
