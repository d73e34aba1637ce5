use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

use super::ExportError;

/// Identifies one export request of one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportTicket {
    pub user_id: Uuid,
    seq: u64,
}

/// Remembers the latest export each user started. An export that finishes
/// after a newer one began for the same user is stale.
#[derive(Debug, Default)]
pub struct ExportTracker {
    latest: Mutex<HashMap<Uuid, u64>>,
    next: AtomicU64,
}

impl ExportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, user_id: Uuid) -> ExportTicket {
        let seq = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id, seq);
        ExportTicket { user_id, seq }
    }

    /// Closes the ticket. A superseded ticket yields `ExportError::Superseded`
    /// and leaves the newer export's entry in place.
    pub fn finish(&self, ticket: &ExportTicket) -> Result<(), ExportError> {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        match latest.get(&ticket.user_id) {
            Some(seq) if *seq == ticket.seq => {
                latest.remove(&ticket.user_id);
                Ok(())
            }
            _ => Err(ExportError::Superseded),
        }
    }
}
