//! One-shot barrier that opens once every identity has its visuals.

use tracing::info;

use crate::types::Identity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessGate {
    ready: Vec<bool>,
    remaining: usize,
}

impl ReadinessGate {
    pub fn new(identities: u8) -> Self {
        Self {
            ready: vec![false; identities as usize],
            remaining: identities as usize,
        }
    }

    /// Record that `identity` is ready.
    ///
    /// Returns true exactly once: on the call that readies the last identity.
    /// Repeats and out-of-range identities are ignored.
    pub fn mark_ready(&mut self, identity: Identity) -> bool {
        let Some(slot) = self.ready.get_mut(identity.index() as usize) else {
            return false;
        };
        if *slot {
            return false;
        }
        *slot = true;
        self.remaining -= 1;
        if self.remaining == 0 {
            info!(identities = self.ready.len(), "all identities ready");
            return true;
        }
        false
    }

    pub fn is_open(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Number of identities the gate waits for.
    pub fn identities(&self) -> usize {
        self.ready.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_exactly_once() {
        let mut gate = ReadinessGate::new(3);
        assert!(!gate.is_open());
        assert!(!gate.mark_ready(Identity::new(0)));
        assert!(!gate.mark_ready(Identity::new(0)));
        assert!(!gate.mark_ready(Identity::new(2)));
        assert_eq!(gate.remaining(), 1);
        assert!(gate.mark_ready(Identity::new(1)));
        assert!(gate.is_open());
        assert!(!gate.mark_ready(Identity::new(1)));
    }

    #[test]
    fn ignores_unknown_identities() {
        let mut gate = ReadinessGate::new(1);
        assert!(!gate.mark_ready(Identity::new(5)));
        assert!(gate.mark_ready(Identity::new(0)));
    }
}
