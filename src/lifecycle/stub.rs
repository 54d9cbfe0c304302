//! In-process platform for tests and device-less runs.
//!
//! [`StubPlatform`] implements both [`PermissionService`] and
//! [`LocationProvider`]. Its answers are scripted up front and watch
//! updates are pushed by hand with [`StubPlatform::emit`], which makes
//! lifecycle behaviour fully deterministic.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use super::options::LocationOptions;
use super::platform::{LocationProvider, Permission, PermissionService, UpdateCallback, WatchToken};
use crate::error::LocationError;
use crate::state::Fix;

/// Scripted outcome of [`LocationProvider::current_fix`].
#[derive(Debug, Clone)]
pub enum StubFix {
    Ready(Result<Fix, LocationError>),
    /// The request never completes.
    Hang,
}

/// Scripted outcome of [`LocationProvider::watch`] registration.
#[derive(Debug, Clone)]
pub enum StubWatch {
    Accept,
    Reject(LocationError),
}

/// Deterministic location platform.
pub struct StubPlatform {
    permission: Mutex<Result<Permission, LocationError>>,
    fix: Mutex<StubFix>,
    watch: Mutex<StubWatch>,
    watches: Mutex<HashMap<WatchToken, Arc<UpdateCallback>>>,
    next_token: AtomicU64,
    permission_requests: AtomicUsize,
    fix_requests: AtomicUsize,
    last_options: Mutex<Option<LocationOptions>>,
}

impl Default for StubPlatform {
    fn default() -> Self {
        StubPlatform {
            permission: Mutex::new(Ok(Permission::Granted)),
            fix: Mutex::new(StubFix::Hang),
            watch: Mutex::new(StubWatch::Accept),
            watches: Mutex::new(HashMap::new()),
            next_token: AtomicU64::new(1),
            permission_requests: AtomicUsize::new(0),
            fix_requests: AtomicUsize::new(0),
            last_options: Mutex::new(None),
        }
    }
}

impl StubPlatform {
    /// Grants permission, hangs on fix requests, accepts watches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every one-shot request with `fix`.
    pub fn with_fix(fix: Fix) -> Self {
        let platform = Self::new();
        platform.set_fix(StubFix::Ready(Ok(fix)));
        platform
    }

    pub fn set_permission(&self, permission: Result<Permission, LocationError>) {
        *lock(&self.permission) = permission;
    }

    pub fn set_fix(&self, fix: StubFix) {
        *lock(&self.fix) = fix;
    }

    pub fn set_watch(&self, watch: StubWatch) {
        *lock(&self.watch) = watch;
    }

    /// Delivers `update` to every registered watch. Returns how many
    /// watches received it.
    pub fn emit(&self, update: Result<Fix, LocationError>) -> usize {
        // callbacks run outside the lock so they may clear watches
        let callbacks: Vec<Arc<UpdateCallback>> = lock(&self.watches).values().cloned().collect();
        for callback in &callbacks {
            (**callback)(update.clone());
        }
        callbacks.len()
    }

    /// Number of watches registered and not yet cleared.
    pub fn active_watches(&self) -> usize {
        lock(&self.watches).len()
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }

    pub fn fix_requests(&self) -> usize {
        self.fix_requests.load(Ordering::SeqCst)
    }

    /// Options passed with the most recent fix or watch request.
    pub fn last_options(&self) -> Option<LocationOptions> {
        lock(&self.last_options).clone()
    }
}

#[async_trait]
impl PermissionService for StubPlatform {
    async fn request_permission(&self) -> Result<Permission, LocationError> {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        lock(&self.permission).clone()
    }
}

#[async_trait]
impl LocationProvider for StubPlatform {
    async fn current_fix(&self, options: &LocationOptions) -> Result<Fix, LocationError> {
        self.fix_requests.fetch_add(1, Ordering::SeqCst);
        *lock(&self.last_options) = Some(options.clone());
        let fix = lock(&self.fix).clone();
        match fix {
            StubFix::Ready(result) => result,
            StubFix::Hang => std::future::pending().await,
        }
    }

    async fn watch(
        &self,
        options: &LocationOptions,
        on_update: UpdateCallback,
    ) -> Result<WatchToken, LocationError> {
        *lock(&self.last_options) = Some(options.clone());
        let watch = lock(&self.watch).clone();
        if let StubWatch::Reject(err) = watch {
            return Err(err);
        }
        let token = WatchToken(format!(
            "stub-watch-{}",
            self.next_token.fetch_add(1, Ordering::SeqCst)
        ));
        lock(&self.watches).insert(token.clone(), Arc::new(on_update));
        Ok(token)
    }

    fn clear_watch(&self, token: &WatchToken) {
        lock(&self.watches).remove(token);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
