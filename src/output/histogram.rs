// Equal-width time buckets for the publication histogram.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Default number of histogram buckets.
pub const DEFAULT_BINS: usize = 10;

/// One bucket: `[start, end)`, except the last which also holds `end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBin {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub count: usize,
}

/// Split `dates` into `bins` equal-width buckets spanning earliest to latest.
///
/// If every date is the same instant there is a single bucket. An empty
/// input gives no buckets.
pub fn bin_dates(dates: &[DateTime<Utc>], bins: usize) -> Vec<DateBin> {
    let (Some(&min), Some(&max)) = (dates.iter().min(), dates.iter().max()) else {
        return Vec::new();
    };

    let span = (max - min).num_seconds();
    if span == 0 {
        return vec![DateBin {
            start: min,
            end: max,
            count: dates.len(),
        }];
    }

    let bins = bins.max(1);
    let width = span as f64 / bins as f64;
    let edge = |i: usize| min + Duration::seconds((width * i as f64).round() as i64);

    let mut out: Vec<DateBin> = (0..bins)
        .map(|i| DateBin {
            start: edge(i),
            end: if i + 1 == bins { max } else { edge(i + 1) },
            count: 0,
        })
        .collect();

    for date in dates {
        let offset = (*date - min).num_seconds() as f64;
        let idx = ((offset / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }

    out
}
