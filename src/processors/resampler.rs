use chrono::Duration;
use tracing::debug;

use crate::models::{Field, Observation, ObservationSeries, Reading};
use crate::readers::FeedLayout;

/// Minute-of-hour grid with a fixed step, e.g. every 15 minutes -> {0, 15, 30, 45}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    unit_minutes: u32,
}

impl Grid {
    pub const fn every(unit_minutes: u32) -> Self {
        Self { unit_minutes }
    }

    pub fn unit_minutes(&self) -> u32 {
        self.unit_minutes
    }

    pub fn contains_minute(&self, minute: u32) -> bool {
        self.unit_minutes != 0 && minute % self.unit_minutes == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResamplePolicy {
    None,
    /// Keep only observations whose minute falls on the grid
    Filter(Grid),
    /// Fill grid points between consecutive samples, interpolating `field`
    /// linearly and carrying every other reading forward
    Interpolate { grid: Grid, field: Field },
}

pub struct TemporalResampler {
    policy: ResamplePolicy,
    sentinels: &'static [&'static str],
}

impl TemporalResampler {
    pub fn new(policy: ResamplePolicy) -> Self {
        Self {
            policy,
            sentinels: &[],
        }
    }

    pub fn for_layout(layout: &FeedLayout) -> Self {
        Self {
            policy: layout.resample,
            sentinels: layout.sentinels,
        }
    }

    pub fn apply(&self, observations: ObservationSeries) -> ObservationSeries {
        let before = observations.len();
        let output = match self.policy {
            ResamplePolicy::None => observations,
            ResamplePolicy::Filter(grid) => filter_to_grid(observations, grid),
            ResamplePolicy::Interpolate { grid, field } => self.interpolate(observations, grid, field),
        };
        debug!("Resampled {} observations into {} ({:?})", before, output.len(), self.policy);
        output
    }

    fn interpolate(&self, observations: ObservationSeries, grid: Grid, field: Field) -> ObservationSeries {
        if grid.unit_minutes() == 0 {
            return observations;
        }

        let mut output = Vec::with_capacity(observations.len());
        let mut iter = observations.into_iter().peekable();

        while let Some(current) = iter.next() {
            let synthesized = match iter.peek() {
                Some(next) => self.synthesize_between(&current, next, grid, field),
                None => Vec::new(),
            };
            output.push(current);
            output.extend(synthesized);
        }

        output
    }

    /// Grid points strictly between `a` and `b`; `b` itself is not emitted
    fn synthesize_between(&self, a: &Observation, b: &Observation, grid: Grid, field: Field) -> Vec<Observation> {
        let unit = i64::from(grid.unit_minutes());
        let gap_minutes = (b.timestamp - a.timestamp).num_minutes();
        let intervals = if gap_minutes > 0 { gap_minutes / unit } else { 0 };

        if intervals <= 1 {
            return Vec::new();
        }

        let endpoints = match (self.usable_value(a.reading(field)), self.usable_value(b.reading(field))) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        };

        (1..intervals)
            .map(|j| {
                let mut point = a.clone();
                point.timestamp = a.timestamp + Duration::minutes(j * unit);
                if let Some((start, end)) = endpoints {
                    let ratio = j as f64 / intervals as f64;
                    let value = start + (end - start) * ratio;
                    point.set_reading(field, Reading::new(format_one_decimal(value)));
                }
                point
            })
            .collect()
    }

    fn usable_value(&self, reading: &Reading) -> Option<f64> {
        match reading.as_str() {
            Some(raw) if self.sentinels.contains(&raw) => None,
            _ => reading.as_f64(),
        }
    }
}

/// One decimal place, ties rounded away from zero (`10.25` -> `10.3`)
fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

fn filter_to_grid(observations: ObservationSeries, grid: Grid) -> ObservationSeries {
    observations
        .into_iter()
        .filter(|obs| grid.contains_minute(obs.minute_of_hour()))
        .collect()
}
