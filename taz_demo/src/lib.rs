use std::sync::LazyLock;

use chrono::{DateTime, Utc};

pub mod contact;
pub mod spam;

/// Fixed point in time used as "now" by tests.
pub static NOW: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| DateTime::from_timestamp_millis(1_730_000_000_000).unwrap());
