//! Process-wide recycling pool for limb buffers.
//!
//! The multiplication and division internals churn through short-lived
//! scratch buffers; recycling them keeps the allocator out of the inner
//! loops. The pool accepts concurrent put/get from parallel workers.

use crate::Limb;
use std::sync::Mutex;

/// Buffers retained beyond this count are dropped instead of pooled.
const MAX_POOLED: usize = 64;

static POOL: Mutex<Vec<Vec<Limb>>> = Mutex::new(Vec::new());

/// Fetches a zeroed buffer of exactly `n` limbs, reusing a pooled
/// allocation when one is available.
pub(crate) fn get(n: usize) -> Vec<Limb> {
    let mut buf = POOL
        .lock()
        .unwrap_or_else(|err| err.into_inner())
        .pop()
        .unwrap_or_default();
    buf.clear();
    buf.resize(n, Limb::ZERO);
    buf
}

/// Returns a buffer to the pool.
pub(crate) fn put(buf: Vec<Limb>) {
    let mut pool = POOL.lock().unwrap_or_else(|err| err.into_inner());
    if pool.len() < MAX_POOLED {
        pool.push(buf);
    }
}
