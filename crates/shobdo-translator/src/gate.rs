use std::sync::{Mutex, MutexGuard, PoisonError};

/// Issued for one submission; only the newest ticket may apply its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Default)]
struct GateState {
    generation: u64,
    busy: bool,
}

/// Single in-flight request guard with stale-response detection
#[derive(Default)]
pub struct RequestGate {
    state: Mutex<GateState>,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a request, `None` while another one is still running
    pub fn try_begin(&self) -> Option<Ticket> {
        let mut state = self.lock();
        if state.busy {
            return None;
        }
        state.generation += 1;
        state.busy = true;
        Some(Ticket(state.generation))
    }

    /// Complete a request. Returns false when the ticket went stale, in which
    /// case its result must be dropped.
    pub fn finish(&self, ticket: Ticket) -> bool {
        let mut state = self.lock();
        if state.generation != ticket.0 {
            return false;
        }
        state.busy = false;
        true
    }

    /// Drop whatever is in flight (view changed)
    pub fn invalidate(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.lock().busy
    }
}
