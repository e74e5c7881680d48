use chrono::{DateTime, TimeDelta, Utc};

/// Submission history with one entry `offset` before `now` for each offset,
/// as stored in the durable history.
pub fn history(now: DateTime<Utc>, offsets: &[TimeDelta]) -> Vec<i64> {
    offsets
        .iter()
        .map(|&offset| (now - offset).timestamp_millis())
        .collect()
}

/// `count` submissions spread evenly over the `span` before `now`, the most
/// recent one `span / count` ago.
pub fn evenly_spread(now: DateTime<Utc>, span: TimeDelta, count: i32) -> Vec<i64> {
    let step = span / count;
    (1..=count).map(|i| (now - step * i).timestamp_millis()).collect()
}
