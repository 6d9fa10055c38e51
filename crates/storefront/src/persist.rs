//! Load/save boundary around the pure store states.
//!
//! [`Persisted`] owns a state value and a storage handle. It reads the state
//! once when constructed and writes the whole state back after every accepted
//! mutation, using the same envelope the browser stores use:
//!
//! ```json
//! {"state": {"items": []}, "version": 0}
//! ```
//!
//! Loading fails open. A missing key, unreadable storage, malformed JSON or a
//! version mismatch all produce `S::default()` and a warning. Saving never
//! fails the caller either: the in-memory state stays authoritative and the
//! write error is logged.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use clearr_core::{CartState, RecentlyViewedState};

use crate::error::StorageError;
use crate::storage::Storage;

/// Storage key for the cart.
pub const CART_KEY: &str = "smart-reading-cart";

/// Storage key for the recently viewed history.
pub const RECENTLY_VIEWED_KEY: &str = "clearr-vision-recently-viewed";

/// A state that can be persisted under a fixed key.
pub trait PersistentState: Serialize + DeserializeOwned + Default {
    /// Storage key the state lives under.
    const KEY: &'static str;

    /// Schema version written alongside the state.
    const VERSION: u32 = 0;

    /// Repair a freshly decoded state so it upholds the invariants its
    /// mutations maintain. Returns `true` if anything changed.
    fn normalize(&mut self) -> bool {
        false
    }
}

impl PersistentState for CartState {
    const KEY: &'static str = CART_KEY;

    fn normalize(&mut self) -> bool {
        Self::normalize(self)
    }
}

impl PersistentState for RecentlyViewedState {
    const KEY: &'static str = RECENTLY_VIEWED_KEY;

    fn normalize(&mut self) -> bool {
        Self::normalize(self)
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, S> {
    state: &'a S,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope<S> {
    state: S,
    #[serde(default)]
    version: u32,
}

/// A state value bound to durable storage.
pub struct Persisted<S> {
    state: S,
    storage: Rc<dyn Storage>,
}

impl<S: PersistentState> Persisted<S> {
    /// Load the state from storage, falling back to the default state.
    ///
    /// Decoded state is normalized before use. The repaired form is written
    /// back with the next accepted mutation.
    #[must_use]
    pub fn load(storage: Rc<dyn Storage>) -> Self {
        let state = match read_state::<S>(storage.as_ref()) {
            Ok(Some(mut state)) => {
                if state.normalize() {
                    warn!(key = S::KEY, "Repaired inconsistent store state");
                } else {
                    debug!(key = S::KEY, "Rehydrated store");
                }
                state
            }
            Ok(None) => S::default(),
            Err(e) => {
                warn!(key = S::KEY, error = %e, "Discarding unreadable store state");
                S::default()
            }
        };
        Self { state, storage }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Apply a mutation and persist if it reports a change.
    ///
    /// The closure returns whether the state changed; unchanged states are not
    /// written.
    pub fn mutate(&mut self, f: impl FnOnce(&mut S) -> bool) -> bool {
        let changed = f(&mut self.state);
        if changed {
            self.save();
        }
        changed
    }

    /// Write the current state to storage, logging any failure.
    pub fn save(&self) {
        if let Err(e) = write_state(self.storage.as_ref(), &self.state) {
            warn!(key = S::KEY, error = %e, "Failed to persist store state");
        }
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for Persisted<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persisted")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Read and decode a state, without falling back.
///
/// # Errors
///
/// Returns an error if storage cannot be read, the envelope does not decode,
/// or the stored version differs from [`PersistentState::VERSION`].
pub fn read_state<S: PersistentState>(storage: &dyn Storage) -> Result<Option<S>, StorageError> {
    let Some(raw) = storage.get(S::KEY)? else {
        return Ok(None);
    };

    let envelope: Envelope<S> = serde_json::from_str(&raw)?;
    if envelope.version != S::VERSION {
        return Err(StorageError::VersionMismatch {
            found: envelope.version,
            expected: S::VERSION,
        });
    }
    Ok(Some(envelope.state))
}

/// Encode and write a state.
///
/// # Errors
///
/// Returns an error if the state cannot be encoded or storage cannot be
/// written.
pub fn write_state<S: PersistentState>(storage: &dyn Storage, state: &S) -> Result<(), StorageError> {
    let raw = serde_json::to_string(&EnvelopeRef {
        state,
        version: S::VERSION,
    })?;
    storage.set(S::KEY, &raw)
}
