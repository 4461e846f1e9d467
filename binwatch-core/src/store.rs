//! In-memory stores owning the live alert and bin collections.

use std::mem;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::debug;

use crate::ids::IdentityGenerator;
use crate::model::{Alert, AlertId, AlertStatus, Bin, BinId, BinStatus, Coordinate};
use crate::ports::StoreError;

// Every operation leaves the collection consistent, so a poisoned lock still
// guards valid data.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the reported alerts in insertion order.
#[derive(Debug, Default)]
pub struct AlertStore {
    alerts: RwLock<Vec<Alert>>,
    ids: IdentityGenerator,
}

impl AlertStore {
    /// Empty store with a clock-seeded identifier source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store drawing identifiers from `ids`.
    #[must_use]
    pub fn with_ids(ids: IdentityGenerator) -> Self {
        Self {
            alerts: RwLock::default(),
            ids,
        }
    }

    /// Snapshot of all alerts.
    #[must_use]
    pub fn list(&self) -> Vec<Alert> {
        read(&self.alerts).clone()
    }

    /// Number of live alerts.
    #[must_use]
    pub fn len(&self) -> usize {
        read(&self.alerts).len()
    }

    /// Whether the store holds no alerts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        read(&self.alerts).is_empty()
    }

    /// Build an active alert without storing it.
    ///
    /// Coordinates are not range-checked.
    #[must_use]
    pub fn draft(&self, position: Coordinate, category: impl Into<String>) -> Alert {
        Alert {
            id: AlertId(self.ids.next()),
            lat: position.lat,
            lng: position.lng,
            category: category.into(),
            timestamp: Utc::now(),
            status: AlertStatus::Active,
        }
    }

    /// Record a new active alert and return it.
    pub fn create(&self, position: Coordinate, category: impl Into<String>) -> Alert {
        let alert = self.draft(position, category);
        write(&self.alerts).push(alert.clone());
        debug!(alert_id = %alert.id, category = %alert.category, "alert created");
        alert
    }

    /// Remove the alert with `id`.
    ///
    /// Idempotent: a missing id is not an error. Returns whether a record was removed.
    pub fn delete(&self, id: AlertId) -> bool {
        let mut alerts = write(&self.alerts);
        let before = alerts.len();
        alerts.retain(|alert| alert.id != id);
        let removed = alerts.len() != before;
        debug!(alert_id = %id, removed, "alert delete");
        removed
    }

    /// Swap in a whole new collection, returning the previous one.
    pub fn replace(&self, alerts: Vec<Alert>) -> Vec<Alert> {
        if let Some(max) = alerts.iter().map(|alert| alert.id.0).max() {
            self.ids.reserve_through(max);
        }
        mem::replace(&mut *write(&self.alerts), alerts)
    }

    /// Drop every alert, returning how many were removed.
    pub fn clear(&self) -> usize {
        self.replace(Vec::new()).len()
    }
}

/// Owns the registered bins in insertion order.
#[derive(Debug, Default)]
pub struct BinStore {
    bins: RwLock<Vec<Bin>>,
    ids: IdentityGenerator,
}

impl BinStore {
    /// Empty store with a clock-seeded identifier source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store drawing identifiers from `ids`.
    #[must_use]
    pub fn with_ids(ids: IdentityGenerator) -> Self {
        Self {
            bins: RwLock::default(),
            ids,
        }
    }

    /// Snapshot of all bins.
    #[must_use]
    pub fn list(&self) -> Vec<Bin> {
        read(&self.bins).clone()
    }

    /// Number of live bins.
    #[must_use]
    pub fn len(&self) -> usize {
        read(&self.bins).len()
    }

    /// Whether the store holds no bins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        read(&self.bins).is_empty()
    }

    /// Register a new active bin and return it.
    pub fn create(&self, position: Coordinate) -> Bin {
        let bin = Bin {
            id: BinId(self.ids.next()),
            lat: position.lat,
            lng: position.lng,
            status: BinStatus::Active,
        };
        write(&self.bins).push(bin.clone());
        debug!(bin_id = %bin.id, "bin created");
        bin
    }

    /// Set the status of the bin with `id` and return the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BinNotFound`] when no bin has that id; the
    /// collection is left untouched.
    pub fn update_status(&self, id: BinId, status: impl Into<BinStatus>) -> Result<Bin, StoreError> {
        let mut bins = write(&self.bins);
        let bin = bins
            .iter_mut()
            .find(|bin| bin.id == id)
            .ok_or(StoreError::BinNotFound(id))?;
        bin.status = status.into();
        debug!(bin_id = %id, status = %bin.status, "bin status updated");
        Ok(bin.clone())
    }

    /// Swap in a whole new collection, returning the previous one.
    ///
    /// Later [`create`](Self::create) calls allocate ids above every installed id.
    pub fn replace(&self, bins: Vec<Bin>) -> Vec<Bin> {
        if let Some(max) = bins.iter().map(|bin| bin.id.0).max() {
            self.ids.reserve_through(max);
        }
        mem::replace(&mut *write(&self.bins), bins)
    }

    /// Drop every bin, returning how many were removed.
    pub fn clear(&self) -> usize {
        self.replace(Vec::new()).len()
    }
}
