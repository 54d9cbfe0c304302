//! The owned handle of a continuous location subscription.

use std::sync::{Arc, Weak};

use uuid::Uuid;

use super::Shared;

/// Identifies one subscription of one [`LocationLifecycle`].
///
/// [`LocationLifecycle`]: super::LocationLifecycle
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub(crate) fn new() -> Self {
        SubscriptionId(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle of an active location watch.
///
/// The platform watch is released when the handle is cancelled or
/// dropped, when a newer subscription replaces it, or when the owning
/// lifecycle is dropped, whichever comes first. Cancelling an already
/// released handle does nothing.
#[derive(Debug)]
#[must_use = "dropping a Subscription cancels it"]
pub struct Subscription {
    id: SubscriptionId,
    shared: Weak<Shared>,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, shared: &Arc<Shared>) -> Self {
        Subscription {
            id,
            shared: Arc::downgrade(shared),
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Whether this handle still owns the lifecycle's platform watch.
    pub fn is_active(&self) -> bool {
        self.shared
            .upgrade()
            .map(|shared| shared.is_active(self.id))
            .unwrap_or(false)
    }

    /// Deregisters the platform watch. Once this returns no further
    /// update of this subscription reaches the lifecycle state.
    pub fn cancel(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.cancel(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
