pub mod csv_writer;
pub mod timestamp;

pub use csv_writer::{write_csv_file, CsvWriter};
pub use timestamp::TimestampStyle;
