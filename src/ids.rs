//! Time-derived identifiers.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Current unix time in milliseconds, bumped past `last` when the clock has not
/// moved (or went backwards) since the previous call. Records the result in
/// `last`.
pub fn monotonic_millis(last: &AtomicI64) -> i64 {
    let now = Utc::now().timestamp_millis();
    let previous = last
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
            Some(now.max(prev + 1))
        })
        .unwrap_or_else(|prev| prev);
    now.max(previous + 1)
}
