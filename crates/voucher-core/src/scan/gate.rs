//! Scan debounce gate
//!
//! A camera keeps reporting the same code for as long as it stays in view.
//! The gate admits one scan at a time and drops every frame that arrives
//! while that scan is still being resolved and claimed. It does not protect
//! against other devices; the conditional claim at the store does that.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

/// Single-slot latch, initially open.
///
/// The state word counts lock transitions: odd means held. Each acquire
/// and each release bumps it, so a permit can tell whether the hold it
/// took is still the current one.
#[derive(Debug, Default)]
pub struct ScanGate {
    state: AtomicU64,
}

impl ScanGate {
    pub const fn new() -> Self {
        Self {
            state: AtomicU64::new(0),
        }
    }

    /// Take the slot if it is free. The returned permit reopens the gate
    /// when dropped, so every exit path of the pipeline clears it.
    pub fn try_acquire(&self) -> Option<ScanPermit<'_>> {
        self.lock().map(|held| ScanPermit { gate: self, held })
    }

    /// Take the slot without a permit. Returns `false` (scan ignored) when
    /// it is already held; the caller must `release` afterwards.
    pub fn admit(&self, raw: &str) -> bool {
        let admitted = self.lock().is_some();
        if !admitted {
            debug!(len = raw.len(), "scan dropped by debounce gate");
        }
        admitted
    }

    pub fn release(&self) {
        self.open();
    }

    /// Reopen the gate regardless of who holds it. Called when the host app
    /// comes back to the foreground after a claim was interrupted. A permit
    /// taken before this call no longer owns the gate.
    pub fn force_release(&self) {
        if self.open() {
            debug!("scan gate force-released");
        }
    }

    pub fn is_locked(&self) -> bool {
        is_held(self.state.load(Ordering::Acquire))
    }

    /// Returns the held state on success
    fn lock(&self) -> Option<u64> {
        self.state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |state| {
                (!is_held(state)).then(|| state.wrapping_add(1))
            })
            .ok()
            .map(|prev| prev.wrapping_add(1))
    }

    /// Returns whether the gate was held
    fn open(&self) -> bool {
        self.state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |state| {
                is_held(state).then(|| state.wrapping_add(1))
            })
            .is_ok()
    }

    /// Open the gate only if `held` is still the current hold
    fn release_held(&self, held: u64) {
        let _ = self.state.compare_exchange(
            held,
            held.wrapping_add(1),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }
}

fn is_held(state: u64) -> bool {
    state & 1 == 1
}

/// Held for the duration of one scan
#[derive(Debug)]
pub struct ScanPermit<'a> {
    gate: &'a ScanGate,
    held: u64,
}

impl Drop for ScanPermit<'_> {
    fn drop(&mut self) {
        self.gate.release_held(self.held);
    }
}
