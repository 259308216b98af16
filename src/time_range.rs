//! Chart time-range table
//!
//! A fixed, ordered lookup table mapping the human-facing period labels
//! shown above the price chart to the query parameters the upstream
//! expects. Read-only data, never mutated at runtime.

/// One entry of the time-range table
///
/// `value` is the stable identifier callers pass to
/// [`crate::client::DashboardClient::fetch_asset_history`]; `days` is
/// the upstream `days` query parameter derived from it; `interval` is
/// the candle granularity the chart renders at for this span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRangeSpec {
    pub label: &'static str,
    pub value: &'static str,
    pub interval: &'static str,
    pub days: u32,
}

/// The seven supported chart spans, in display order
pub const TIME_RANGES: [TimeRangeSpec; 7] = [
    TimeRangeSpec { label: "1H", value: "hour", interval: "m1", days: 1 },
    TimeRangeSpec { label: "1D", value: "day", interval: "m15", days: 1 },
    TimeRangeSpec { label: "1W", value: "week", interval: "h1", days: 7 },
    TimeRangeSpec { label: "1M", value: "month", interval: "h6", days: 30 },
    TimeRangeSpec { label: "3M", value: "3months", interval: "h12", days: 90 },
    TimeRangeSpec { label: "6M", value: "6months", interval: "d1", days: 180 },
    TimeRangeSpec { label: "1Y", value: "year", interval: "d1", days: 365 },
];

/// Looks up a time range by its `value` identifier
pub fn find(value: &str) -> Option<&'static TimeRangeSpec> {
    TIME_RANGES.iter().find(|r| r.value == value)
}
