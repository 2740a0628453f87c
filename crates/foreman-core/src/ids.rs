//! Opaque unique id generation for jobs, checklist items, and files.
//!
//! Ids are short hex strings derived from a SHA-256 digest over the current
//! millisecond timestamp and a process-local counter. They are generated once
//! at record creation, never mutated, and never reused; two records created
//! in the same millisecond still get distinct ids because of the counter.

use std::sync::atomic::{AtomicU64, Ordering};

use jiff::Timestamp;
use sha2::{Digest, Sha256};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh opaque id.
pub fn new_id() -> String {
    let millis = Timestamp::now().as_millisecond();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut hasher = Sha256::new();
    hasher.update(millis.to_le_bytes());
    hasher.update(seq.to_le_bytes());
    let digest = hasher.finalize();

    // 10 bytes of digest is plenty for a single-tenant board.
    let mut id = String::with_capacity(20);
    for byte in &digest[..10] {
        id.push_str(&format!("{byte:02x}"));
    }
    id
}
