//! Capability traits for the host platform's location services.
//!
//! The lifecycle never talks to a device SDK directly. It is handed a
//! [`PermissionService`] and a [`LocationProvider`], which may be the
//! real platform bridge, the in-process [`StubPlatform`] or a test
//! double.
//!
//! [`StubPlatform`]: super::stub::StubPlatform

use async_trait::async_trait;

use super::options::LocationOptions;
use crate::error::LocationError;
use crate::state::Fix;

/// Answer to a location permission request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Platform identifier of a registered watch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatchToken(pub String);

impl std::fmt::Display for WatchToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Receives every update of a watch: a new fix or a (possibly
/// transient) error. May be called from any thread.
pub type UpdateCallback = Box<dyn Fn(Result<Fix, LocationError>) + Send + Sync>;

/// Asks the user for location access.
#[async_trait]
pub trait PermissionService: Send + Sync {
    /// Requests permission, prompting the user when needed.
    ///
    /// An `Err` means the platform could not answer at all.
    async fn request_permission(&self) -> Result<Permission, LocationError>;
}

/// Resolves coordinates.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Requests a single fix.
    async fn current_fix(&self, options: &LocationOptions) -> Result<Fix, LocationError>;

    /// Registers a continuous watch. `on_update` is called for every
    /// platform update until [`clear_watch`](Self::clear_watch) is
    /// called with the returned token.
    async fn watch(
        &self,
        options: &LocationOptions,
        on_update: UpdateCallback,
    ) -> Result<WatchToken, LocationError>;

    /// Deregisters a watch. Unknown tokens are ignored.
    fn clear_watch(&self, token: &WatchToken);
}
