//! Outside-click listener registry
//!
//! A field registers while its dropdown is open. The returned guard removes
//! the registration when dropped, so a listener can never outlive its owner.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::core::state::form::FieldId;

/// Shared table of fields that want to hear about outside clicks
#[derive(Debug, Clone, Default)]
pub struct PointerListeners {
    inner: Arc<Mutex<BTreeMap<FieldId, usize>>>,
}

impl PointerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<FieldId, usize>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn register(&self, field: FieldId) -> ListenerGuard {
        *self.lock().entry(field).or_insert(0) += 1;
        log::debug!("pointer listener registered for {field}");
        ListenerGuard {
            field,
            listeners: self.clone(),
        }
    }

    fn unregister(&self, field: FieldId) {
        let mut table = self.lock();
        if let Some(count) = table.get_mut(&field) {
            *count -= 1;
            if *count == 0 {
                table.remove(&field);
            }
        }
        log::debug!("pointer listener removed for {field}");
    }

    /// Fields with at least one live registration
    pub fn active(&self) -> Vec<FieldId> {
        self.lock().keys().copied().collect()
    }

    /// Total number of live registrations
    pub fn active_count(&self) -> usize {
        self.lock().values().sum()
    }

    pub fn is_listening(&self, field: FieldId) -> bool {
        self.lock().contains_key(&field)
    }
}

/// Live registration; unregisters on drop
#[derive(Debug)]
pub struct ListenerGuard {
    field: FieldId,
    listeners: PointerListeners,
}

impl ListenerGuard {
    pub fn field(&self) -> FieldId {
        self.field
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.listeners.unregister(self.field);
    }
}
