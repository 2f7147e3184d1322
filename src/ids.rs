//! Task id generation.
//!
//! Ids are not UUIDs: each is a nanosecond timestamp with a per-node atomic
//! counter appended, so ids are both unique and sortable in submission
//! order even when two tasks land in the same nanosecond tick.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn next_task_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{nanos:020x}-{seq:08x}")
}
