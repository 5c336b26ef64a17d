// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of set up vacuums, keyed by host.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::protocol::Protocol;
use crate::vacuum::Vacuum;

/// Shared registry of the vacuums set up by this platform.
///
/// At most one vacuum is registered per host. Registering a second one for
/// the same host shuts the previous one down.
#[derive(Debug)]
pub struct VacuumRegistry<P: Protocol> {
    vacuums: RwLock<HashMap<String, Arc<Vacuum<P>>>>,
}

impl<P: Protocol> VacuumRegistry<P> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vacuums: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a vacuum for a host.
    ///
    /// Returns the vacuum previously registered for that host, already shut
    /// down.
    pub async fn insert(
        &self,
        host: impl Into<String>,
        vacuum: Arc<Vacuum<P>>,
    ) -> Option<Arc<Vacuum<P>>> {
        let host = host.into();
        let previous = self.vacuums.write().await.insert(host.clone(), vacuum);
        if let Some(previous) = &previous {
            tracing::debug!(host = %host, name = %previous.name(), "Replacing registered vacuum");
            previous.shutdown();
        }
        previous
    }

    /// Returns the vacuum registered for a host.
    pub async fn get(&self, host: &str) -> Option<Arc<Vacuum<P>>> {
        self.vacuums.read().await.get(host).cloned()
    }

    /// Unregisters and shuts down the vacuum of a host.
    ///
    /// Returns `true` if a vacuum was registered.
    pub async fn remove(&self, host: &str) -> bool {
        let removed = self.vacuums.write().await.remove(host);
        if let Some(vacuum) = &removed {
            vacuum.shutdown();
        }
        removed.is_some()
    }

    /// Returns the hosts with a registered vacuum.
    pub async fn hosts(&self) -> Vec<String> {
        self.vacuums.read().await.keys().cloned().collect()
    }

    /// Returns the number of registered vacuums.
    pub async fn len(&self) -> usize {
        self.vacuums.read().await.len()
    }

    /// Returns `true` if no vacuum is registered.
    pub async fn is_empty(&self) -> bool {
        self.vacuums.read().await.is_empty()
    }

    /// Shuts down and unregisters every vacuum.
    pub async fn shutdown_all(&self) {
        let drained: Vec<_> = self.vacuums.write().await.drain().collect();
        for (host, vacuum) in drained {
            tracing::debug!(host = %host, "Shutting down vacuum");
            vacuum.shutdown();
        }
    }
}

impl<P: Protocol> Default for VacuumRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}
