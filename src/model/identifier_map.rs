//! Translation table from source role IDs to the roles created for them in the target.

use std::collections::HashMap;

/// Bidirectional association between source-guild role IDs and target-guild role IDs.
///
/// Built by role replication and handed by reference to channel replication, which uses
/// it to translate permission overwrites. Contains one entry per source role that was
/// created or matched (the default role always included) and none for skipped roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierMap {
    forward: HashMap<u64, u64>,
    reverse: HashMap<u64, u64>,
}

impl IdentifierMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `source_role_id` is represented by `target_role_id` in the target.
    ///
    /// Re-inserting a source ID replaces its previous target and drops the stale
    /// reverse entry so both directions stay consistent.
    pub fn insert(&mut self, source_role_id: u64, target_role_id: u64) {
        if let Some(previous) = self.forward.insert(source_role_id, target_role_id) {
            self.reverse.remove(&previous);
        }
        if let Some(previous) = self.reverse.insert(target_role_id, source_role_id) {
            if previous != source_role_id {
                self.forward.remove(&previous);
            }
        }
    }

    pub fn target_for(&self, source_role_id: u64) -> Option<u64> {
        self.forward.get(&source_role_id).copied()
    }

    #[cfg(test)]
    pub fn source_for(&self, target_role_id: u64) -> Option<u64> {
        self.reverse.get(&target_role_id).copied()
    }

    #[cfg(test)]
    pub fn contains_source(&self, source_role_id: u64) -> bool {
        self.forward.contains_key(&source_role_id)
    }

    #[cfg(test)]
    pub fn contains_target(&self, target_role_id: u64) -> bool {
        self.reverse.contains_key(&target_role_id)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterates `(source, target)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.forward.iter().map(|(source, target)| (*source, *target))
    }
}
