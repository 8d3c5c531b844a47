//! Generated item ids.
//!
//! Callers that do not name an item get an opaque token built from a
//! per-process seed and a process-wide counter. The seed is drawn once
//! from a random UUID v4, so tokens from different processes differ and
//! tokens within a process never repeat.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;
use uuid::Uuid;

static PROCESS_SEED: LazyLock<u64> = LazyLock::new(|| Uuid::new_v4().as_u64_pair().0);

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(0);

/// Returns a fresh opaque id token.
///
/// Format: `{seed:016x}.{counter:x}`.
#[must_use]
pub(crate) fn generate() -> String {
    let n = NEXT_TOKEN.fetch_add(1, Ordering::Relaxed);
    format!("{:016x}.{:x}", *PROCESS_SEED, n)
}
