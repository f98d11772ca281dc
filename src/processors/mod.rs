pub mod pipeline;
pub mod range_resolver;
pub mod resampler;
pub mod sentinel;

pub use pipeline::{raw_preview, Export, Pipeline};
pub use range_resolver::RangeResolver;
pub use resampler::{Grid, ResamplePolicy, TemporalResampler};
pub use sentinel::SentinelNormalizer;
