pub mod csv_row;
pub mod observation;
pub mod window;

pub use csv_row::CsvRow;
pub use observation::{Field, Observation, ObservationSeries, Reading};
pub use window::{parse_wire_timestamp, RequestWindow};
