use recall_domain::DueSoonKey;
use std::collections::HashSet;
use std::sync::Mutex;

/// Remembers which due-soon thresholds have already alerted so repeat
/// scans stay quiet. The default implementation is process-local memory;
/// an implementation could back this with a cache or a table instead
/// without the scan noticing.
pub trait INotificationLedger: Send + Sync {
    fn has_fired(&self, key: &DueSoonKey) -> bool;
    fn mark_fired(&self, key: DueSoonKey);
}

/// Session-scoped ledger. Entries live until the process exits, so a
/// restart may alert a second time for the same threshold.
pub struct InMemoryNotificationLedger {
    fired: Mutex<HashSet<DueSoonKey>>,
}

impl InMemoryNotificationLedger {
    pub fn new() -> Self {
        Self {
            fired: Mutex::new(HashSet::new()),
        }
    }
}

impl Default for InMemoryNotificationLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl INotificationLedger for InMemoryNotificationLedger {
    fn has_fired(&self, key: &DueSoonKey) -> bool {
        self.fired.lock().unwrap().contains(key)
    }

    fn mark_fired(&self, key: DueSoonKey) {
        self.fired.lock().unwrap().insert(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_domain::ID;

    #[test]
    fn remembers_fired_keys() {
        let ledger = InMemoryNotificationLedger::new();
        let follow_up_id = ID::new();

        let key = DueSoonKey::new(follow_up_id.clone(), 10);
        assert!(!ledger.has_fired(&key));

        ledger.mark_fired(key.clone());
        assert!(ledger.has_fired(&key));
        // same follow-up, other threshold, still unfired
        assert!(!ledger.has_fired(&DueSoonKey::new(follow_up_id, 5)));
    }

    #[test]
    fn marking_twice_is_harmless() {
        let ledger = InMemoryNotificationLedger::new();
        let key = DueSoonKey::new(ID::new(), 5);
        ledger.mark_fired(key.clone());
        ledger.mark_fired(key.clone());
        assert!(ledger.has_fired(&key));
    }
}
