//! Location acquisition lifecycle.
//!
//! [`LocationLifecycle`] turns platform location services into a
//! [`LocationState`] that the presentation layer can render and the
//! ranking functions can consume. It offers two entry points:
//!
//! - [`acquire_once`](LocationLifecycle::acquire_once) - a single fresh
//!   fix, bounded by [`LocationOptions::timeout`]
//! - [`subscribe`](LocationLifecycle::subscribe) - a continuous watch,
//!   owned through a [`Subscription`] handle
//!
//! Permission denial, timeouts and platform errors are reported as
//! [`LocationState::Failed`], never as `Err`.
//!
//! # Transitions
//!
//! ```text
//! Unknown -> Acquiring -> Available | Failed            (acquire_once)
//! Acquiring -> Available -> Failed -> Available -> ...  (subscription)
//! ```
//!
//! Every transition is published in order on the channel returned by
//! [`transitions`](LocationLifecycle::transitions).
//!
//! # Usage
//!
//! ```ignore
//! let lifecycle = LocationLifecycle::new(permissions, provider, LocationOptions::default());
//!
//! if let LocationState::Available(fix) = lifecycle.acquire_once().await {
//!     let ranked = rank(Some(&fix.coordinate), &facilities)?;
//! }
//!
//! let subscription = lifecycle.subscribe().await;
//! let mut rx = lifecycle.transitions();
//! while let Ok(state) = rx.recv().await {
//!     // re-rank with the new state
//! }
//! ```
//!
//! The timeout relies on the tokio time driver, so requests must run
//! inside a tokio runtime with time enabled.

mod options;
pub mod platform;
pub mod stub;
mod subscription;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use crate::error::LocationError;
use crate::state::{Fix, LocationState};

pub use options::{LocationOptions, DEFAULT_TIMEOUT};
pub use platform::{LocationProvider, Permission, PermissionService, UpdateCallback, WatchToken};
pub use subscription::{Subscription, SubscriptionId};

/// Transitions buffered for slow receivers before they lag.
const TRANSITION_CHANNEL_CAPACITY: usize = 64;

/// The platform watch currently owned by the lifecycle.
struct ActiveWatch {
    id: SubscriptionId,
    /// [`None`] while the platform is still registering the watch.
    token: Option<WatchToken>,
}

/// State shared with subscription handles and watch callbacks.
pub(crate) struct Shared {
    state: Mutex<LocationState>,
    transitions: broadcast::Sender<LocationState>,
    active: Mutex<Option<ActiveWatch>>,
    provider: Arc<dyn LocationProvider>,
}

impl Shared {
    fn transition(&self, next: LocationState) {
        let mut state = lock(&self.state);
        debug!("Location state {} -> {}", *state, next);
        *state = next.clone();
        // sent under the state lock so receivers see transitions in order
        let _ = self.transitions.send(next);
    }

    /// Applies one watch update, unless `id` no longer owns the watch.
    fn deliver(&self, id: SubscriptionId, update: Result<Fix, LocationError>) {
        // held for the whole delivery so a concurrent cancel waits for it
        let active = lock(&self.active);
        if active.as_ref().map(|watch| watch.id) != Some(id) {
            trace!("Dropping update for inactive subscription {}", id);
            return;
        }
        match update.and_then(checked) {
            Ok(fix) => self.transition(LocationState::Available(fix)),
            Err(err) => {
                warn!("Location watch {} reported: {}", id, err);
                self.transition(LocationState::Failed(err));
            }
        }
    }

    fn is_active(&self, id: SubscriptionId) -> bool {
        lock(&self.active).as_ref().map(|watch| watch.id) == Some(id)
    }

    /// Records the platform token of a freshly registered watch.
    ///
    /// Returns false, and clears the platform watch, if the subscription
    /// was cancelled while the platform was registering it.
    fn attach_token(&self, id: SubscriptionId, token: WatchToken) -> bool {
        {
            let mut active = lock(&self.active);
            if let Some(watch) = active.as_mut().filter(|watch| watch.id == id) {
                watch.token = Some(token);
                return true;
            }
        }
        self.provider.clear_watch(&token);
        false
    }

    /// Cancels the subscription `id` if it still owns the watch.
    pub(crate) fn cancel(&self, id: SubscriptionId) -> bool {
        let watch = {
            let mut active = lock(&self.active);
            match active.as_ref() {
                Some(watch) if watch.id == id => active.take(),
                _ => None,
            }
        };
        self.release(watch)
    }

    /// Cancels whichever subscription owns the watch.
    fn cancel_active(&self) -> bool {
        let watch = lock(&self.active).take();
        self.release(watch)
    }

    fn release(&self, watch: Option<ActiveWatch>) -> bool {
        match watch {
            Some(watch) => {
                // the active lock is already released: platforms may
                // call back synchronously from clear_watch
                if let Some(token) = &watch.token {
                    self.provider.clear_watch(token);
                }
                info!("Cancelled location subscription {}", watch.id);
                true
            }
            None => false,
        }
    }
}

/// Clears the pending registration of `id` unless disarmed, so that a
/// failed or abandoned `subscribe` never leaves a half-registered watch.
struct PendingWatch<'a> {
    shared: &'a Shared,
    id: SubscriptionId,
    armed: bool,
}

impl Drop for PendingWatch<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.shared.cancel(self.id);
        }
    }
}

/// Drives [`LocationState`] for one consumer.
///
/// At most one subscription is active at a time, and a one-shot request
/// ends it. Dropping the lifecycle releases it.
pub struct LocationLifecycle {
    shared: Arc<Shared>,
    permissions: Arc<dyn PermissionService>,
    options: LocationOptions,
    /// Serializes acquire/subscribe sequences of this consumer.
    in_flight: tokio::sync::Mutex<()>,
}

impl LocationLifecycle {
    pub fn new(
        permissions: Arc<dyn PermissionService>,
        provider: Arc<dyn LocationProvider>,
        options: LocationOptions,
    ) -> Self {
        let (transitions, _) = broadcast::channel(TRANSITION_CHANNEL_CAPACITY);
        LocationLifecycle {
            shared: Arc::new(Shared {
                state: Mutex::new(LocationState::Unknown),
                transitions,
                active: Mutex::new(None),
                provider,
            }),
            permissions,
            options,
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    /// Builds a lifecycle over a platform that provides both services.
    pub fn with_platform<P>(platform: Arc<P>, options: LocationOptions) -> Self
    where
        P: PermissionService + LocationProvider + 'static,
    {
        Self::new(platform.clone(), platform, options)
    }

    pub fn options(&self) -> &LocationOptions {
        &self.options
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LocationState {
        lock(&self.shared.state).clone()
    }

    /// Receives every transition made after this call, in order.
    pub fn transitions(&self) -> broadcast::Receiver<LocationState> {
        self.shared.transitions.subscribe()
    }

    pub fn has_active_subscription(&self) -> bool {
        lock(&self.shared.active).is_some()
    }

    /// Requests one fresh fix.
    ///
    /// Any active subscription is cancelled first, so its updates cannot
    /// interleave with the request. Then moves to `Acquiring`, asks for
    /// permission and, only if granted, requests a fix bounded by the
    /// configured timeout. Every call issues a new platform request;
    /// earlier fixes are never reused.
    ///
    /// # Returns
    /// The terminal state reached: `Available` or `Failed`.
    pub async fn acquire_once(&self) -> LocationState {
        let _guard = self.in_flight.lock().await;
        if self.shared.cancel_active() {
            debug!("Location subscription replaced by a single fix request");
        }
        info!("Acquiring a single location fix");
        self.shared.transition(LocationState::Acquiring);

        let next = match self.fetch_fix().await {
            Ok(fix) => LocationState::Available(fix),
            Err(err) => {
                warn!("Location fix failed: {}", err);
                LocationState::Failed(err)
            }
        };
        self.shared.transition(next.clone());
        next
    }

    /// Starts a continuous watch.
    ///
    /// Any active subscription is cancelled first. The handle is
    /// returned as soon as the platform accepts the watch; the state
    /// stays `Acquiring` until the first update arrives. Transient
    /// errors reported by the watch move the state to `Failed` without
    /// ending the subscription.
    ///
    /// # Returns
    /// [`None`] when permission is denied or the platform refuses the
    /// watch. The reason is in the `Failed` state.
    pub async fn subscribe(&self) -> Option<Subscription> {
        let _guard = self.in_flight.lock().await;
        if self.shared.cancel_active() {
            debug!("Replacing the previous location subscription");
        }
        info!("Subscribing to location updates");
        self.shared.transition(LocationState::Acquiring);

        if let Err(err) = self.check_permission().await {
            warn!("Location subscription refused: {}", err);
            self.shared.transition(LocationState::Failed(err));
            return None;
        }

        let id = SubscriptionId::new();
        *lock(&self.shared.active) = Some(ActiveWatch { id, token: None });
        let mut pending = PendingWatch {
            shared: &self.shared,
            id,
            armed: true,
        };

        let weak = Arc::downgrade(&self.shared);
        let on_update: UpdateCallback = Box::new(move |update| {
            if let Some(shared) = weak.upgrade() {
                shared.deliver(id, update);
            }
        });

        match self.shared.provider.watch(&self.options, on_update).await {
            Ok(token) => {
                pending.armed = false;
                debug!("Location subscription {} registered as watch {}", id, token);
                if !self.shared.attach_token(id, token) {
                    debug!("Location subscription {} cancelled during registration", id);
                }
                Some(Subscription::new(id, &self.shared))
            }
            Err(err) => {
                drop(pending);
                warn!("Location watch registration failed: {}", err);
                self.shared.transition(LocationState::Failed(err));
                None
            }
        }
    }

    /// Cancels the active subscription, if any. Same effect as
    /// cancelling its handle.
    pub fn cancel_subscription(&self) -> bool {
        self.shared.cancel_active()
    }

    async fn check_permission(&self) -> Result<(), LocationError> {
        match self.permissions.request_permission().await? {
            Permission::Granted => Ok(()),
            Permission::Denied => Err(LocationError::PermissionDenied),
        }
    }

    async fn fetch_fix(&self) -> Result<Fix, LocationError> {
        self.check_permission().await?;

        let timeout = self.options.timeout();
        let fix = tokio::time::timeout(timeout, self.shared.provider.current_fix(&self.options))
            .await
            .map_err(|_| LocationError::Timeout(timeout))??;
        checked(fix)
    }
}

impl Drop for LocationLifecycle {
    fn drop(&mut self) {
        if self.shared.cancel_active() {
            debug!("Location lifecycle dropped with an active subscription");
        }
    }
}

/// Rejects fixes whose coordinate is out of range.
fn checked(fix: Fix) -> Result<Fix, LocationError> {
    fix.coordinate.validate().map_err(|err| {
        LocationError::Platform(format!(
            "provider returned an invalid coordinate {}: {}",
            fix.coordinate, err
        ))
    })?;
    Ok(fix)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
