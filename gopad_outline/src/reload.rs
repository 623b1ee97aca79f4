//! Non-blocking reload gating.
//!
//! File-system watches fire in bursts, and only one outline rebuild may
//! run at a time per watched subtree. A request that arrives while a
//! rebuild is in flight is dropped rather than queued, so the displayed
//! tree can briefly lag the file system until the next event triggers a
//! fresh reload.

use crate::builder::{Outline, OutlineError};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Single-slot gate for outline reloads.
///
/// Occupying the slot means a reload is in flight; the permit releases it
/// on drop. Clones share the same slot.
#[derive(Clone)]
pub struct ReloadGate {
    slot: Sender<()>,
    release: Receiver<()>,
}

impl ReloadGate {
    /// Creates a gate with a free slot.
    pub fn new() -> Self {
        let (slot, release) = bounded(1);
        Self { slot, release }
    }

    /// Tries to occupy the reload slot without blocking.
    ///
    /// Returns `None` when a reload is already in flight; the caller drops
    /// the request.
    pub fn try_acquire(&self) -> Option<ReloadPermit> {
        match self.slot.try_send(()) {
            Ok(()) => Some(ReloadPermit {
                release: self.release.clone(),
            }),
            Err(TrySendError::Full(())) | Err(TrySendError::Disconnected(())) => None,
        }
    }

    /// Rebuilds `outline` unless a reload is already in flight.
    ///
    /// Returns whether the rebuild ran; a dropped request is not an error.
    pub fn reload(&self, outline: &mut Outline) -> Result<bool, OutlineError> {
        let permit = self.try_acquire();
        if permit.is_none() {
            log::debug!(
                "outline reload already in flight; dropping request for {}",
                outline.dir().display()
            );
            return Ok(false);
        }
        outline.reload()?;
        Ok(true)
    }
}

impl Default for ReloadGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Occupation of the reload slot; dropping it frees the slot.
pub struct ReloadPermit {
    release: Receiver<()>,
}

impl Drop for ReloadPermit {
    fn drop(&mut self) {
        let _ = self.release.try_recv();
    }
}
