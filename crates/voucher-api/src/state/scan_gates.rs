//! Per-device scan gates
//!
//! Each scanning device gets its own debounce gate, so one device's
//! in-flight claim never drops frames from another.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;
use voucher_core::ScanGate;

/// Registry of scan gates keyed by client-supplied device id
#[derive(Debug, Default)]
pub struct ScanGateRegistry {
    gates: DashMap<String, Arc<ScanGate>>,
}

impl ScanGateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate for a device, created open on first use
    pub fn gate(&self, device_id: &str) -> Arc<ScanGate> {
        if let Some(gate) = self.gates.get(device_id) {
            return Arc::clone(gate.value());
        }

        let gate = self.gates.entry(device_id.to_string()).or_insert_with(|| {
            debug!(device_id, "Registering scan gate");
            Arc::new(ScanGate::new())
        });
        Arc::clone(gate.value())
    }

    /// Whether a device currently has a scan in flight.
    /// Unknown devices are reported open.
    pub fn is_locked(&self, device_id: &str) -> bool {
        self.gates
            .get(device_id)
            .is_some_and(|gate| gate.is_locked())
    }

    /// Reopen a device's gate after its app returns to the foreground
    pub fn force_release(&self, device_id: &str) {
        if let Some(gate) = self.gates.get(device_id) {
            gate.force_release();
        }
    }

    /// Drop a device's gate once it is open and no request holds it.
    /// Returns whether an entry was removed.
    pub fn reclaim(&self, device_id: &str) -> bool {
        let removed = self
            .gates
            .remove_if(device_id, |_, gate| {
                !gate.is_locked() && Arc::strong_count(gate) == 1
            })
            .is_some();
        if removed {
            debug!(device_id, "Reclaimed idle scan gate");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}
