//! "Latest request wins" sequencing for forecast loads.
//!
//! Every load takes a token when it starts. When it finishes, its result is
//! only used if no newer load has started in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding all earlier ones
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True while `token` is the most recently issued one
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_tokens_increase() {
        let sequencer = RequestSequencer::new();

        let first = sequencer.issue();
        let second = sequencer.issue();

        assert_eq!(first.id(), 1);
        assert!(second > first);
    }

    #[test]
    fn test_newer_request_supersedes_older() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        assert!(sequencer.is_current(first));

        let second = sequencer.issue();
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[test]
    fn test_tokens_unique_across_threads() {
        let sequencer = Arc::new(RequestSequencer::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sequencer = sequencer.clone();
                std::thread::spawn(move || (0..100).map(|_| sequencer.issue().id()).collect::<Vec<_>>())
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 800);
        assert_eq!(ids.last().copied(), Some(800));
    }
}
