//! Shared dedup registry of already-evaluated addresses.

use seedsweep_core::Address;
use std::collections::HashSet;
use std::sync::Mutex;

/// Set of addresses already claimed in the current session.
///
/// `try_claim` is the single admission-control point of the engine: an
/// address is processed (and swept) by at most one worker per session. The
/// set grows monotonically and is dropped with the session.
#[derive(Debug, Default)]
pub struct AddressRegistry {
    seen: Mutex<HashSet<Address>>,
}

impl AddressRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically test-and-insert `address`.
    ///
    /// Returns `true` only for the single caller that inserted the address;
    /// every other concurrent caller for the same address gets `false`.
    pub fn try_claim(&self, address: &Address) -> bool {
        self.seen
            .lock()
            .expect("address registry mutex poisoned")
            .insert(address.clone())
    }

    /// Seed the registry with addresses claimed in earlier sessions.
    pub fn preload<I>(&self, addresses: I)
    where
        I: IntoIterator<Item = Address>,
    {
        self.seen
            .lock()
            .expect("address registry mutex poisoned")
            .extend(addresses);
    }

    /// Number of claimed addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen
            .lock()
            .expect("address registry mutex poisoned")
            .len()
    }

    /// Whether no address has been claimed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
