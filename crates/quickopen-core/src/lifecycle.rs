//! Rescan scheduling state machine.
//!
//! Searches read the path collection without locking, so a rescan must
//! never run while a search is in flight. Instead of a lock, rescan
//! requests arriving mid-search are deferred into a single pending
//! flag and run once the search finishes; redundant requests coalesce.

/// What the controller is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// No indexing or searching in progress
    #[default]
    Idle,
    /// A full re-walk and re-index is in progress
    Rescanning,
    /// A search is being served against the current index
    Searching,
}

/// Outcome of a rescan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescanDecision {
    /// Idle: the rescan may run immediately
    RunNow,
    /// A search is in flight; the rescan runs after it completes
    Deferred,
    /// A rescan is already running; the request is coalesced away
    Coalesced,
}

/// Tracks whether a rescan may run now or must wait.
#[derive(Debug, Default)]
pub struct Lifecycle {
    state: LifecycleState,
    rescan_pending: bool,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn rescan_pending(&self) -> bool {
        self.rescan_pending
    }

    /// Apply the transition table for an external rescan request.
    pub fn request_rescan(&mut self) -> RescanDecision {
        match self.state {
            LifecycleState::Idle => RescanDecision::RunNow,
            LifecycleState::Searching => {
                self.rescan_pending = true;
                RescanDecision::Deferred
            }
            LifecycleState::Rescanning => RescanDecision::Coalesced,
        }
    }

    /// Enter `Rescanning`. Clears any pending flag, the rescan about to
    /// run satisfies it.
    pub fn begin_rescan(&mut self) {
        debug_assert_ne!(self.state, LifecycleState::Searching);
        self.state = LifecycleState::Rescanning;
        self.rescan_pending = false;
    }

    pub fn finish_rescan(&mut self) {
        self.state = LifecycleState::Idle;
    }

    pub fn begin_search(&mut self) {
        debug_assert_eq!(self.state, LifecycleState::Idle);
        self.state = LifecycleState::Searching;
    }

    /// Leave `Searching`; returns true if a deferred rescan must now
    /// run (and clears the flag).
    pub fn finish_search(&mut self) -> bool {
        self.state = LifecycleState::Idle;
        std::mem::take(&mut self.rescan_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_while_idle_runs_now() {
        let mut lc = Lifecycle::new();
        assert_eq!(lc.request_rescan(), RescanDecision::RunNow);
        assert!(!lc.rescan_pending());
    }

    #[test]
    fn test_request_while_searching_defers() {
        let mut lc = Lifecycle::new();
        lc.begin_search();
        assert_eq!(lc.request_rescan(), RescanDecision::Deferred);
        assert!(lc.rescan_pending());
        assert_eq!(lc.state(), LifecycleState::Searching);
    }

    #[test]
    fn test_request_while_rescanning_coalesces() {
        let mut lc = Lifecycle::new();
        lc.begin_rescan();
        assert_eq!(lc.request_rescan(), RescanDecision::Coalesced);
        assert!(!lc.rescan_pending());
    }

    #[test]
    fn test_finish_search_reports_deferred_rescan_once() {
        let mut lc = Lifecycle::new();
        lc.begin_search();
        // Any number of requests during the search collapse to one.
        lc.request_rescan();
        lc.request_rescan();
        lc.request_rescan();
        assert!(lc.finish_search());
        assert!(!lc.rescan_pending());

        lc.begin_search();
        assert!(!lc.finish_search());
    }

    #[test]
    fn test_rescan_cycle_returns_to_idle() {
        let mut lc = Lifecycle::new();
        lc.begin_rescan();
        assert_eq!(lc.state(), LifecycleState::Rescanning);
        lc.finish_rescan();
        assert_eq!(lc.state(), LifecycleState::Idle);
    }

    #[test]
    fn test_begin_rescan_satisfies_pending_flag() {
        let mut lc = Lifecycle::new();
        lc.begin_search();
        lc.request_rescan();
        lc.finish_search();
        lc.begin_rescan();
        lc.finish_rescan();
        assert!(!lc.rescan_pending());
    }
}
