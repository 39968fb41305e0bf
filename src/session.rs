//! Per-connection result area.
//!
//! Aggregation runs are not cancelled when a newer one starts, so two runs can
//! finish out of order. Each run takes a [`Generation`] before it starts and
//! may only replace the stored results if nothing newer has begun since.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::client::{MealDetail, MealId};

/// Token identifying one aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

#[derive(Debug, Default)]
pub struct SearchSession {
    latest: AtomicU64,
    meals: Mutex<Vec<MealDetail>>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new run; every earlier token becomes stale.
    pub fn begin(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::SeqCst) == generation.0
    }

    /// Stores `meals` if `generation` is still the latest run. Returns whether it did.
    pub fn commit(&self, generation: Generation, meals: Vec<MealDetail>) -> bool {
        let mut meals_slot = self.lock();
        // Checked under the lock so a concurrent clear() cannot interleave.
        if !self.is_current(generation) {
            tracing::debug!(
                "Discarding stale results from run {} (latest is {})",
                generation.0,
                self.latest.load(Ordering::SeqCst)
            );
            return false;
        }
        *meals_slot = meals;
        true
    }

    /// Empties the result area and invalidates any run still in flight.
    pub fn clear(&self) {
        let mut meals = self.lock();
        self.begin();
        meals.clear();
    }

    pub fn find(&self, id: &MealId) -> Option<MealDetail> {
        self.lock().iter().find(|meal| meal.id() == id).cloned()
    }

    pub fn results(&self) -> Vec<MealDetail> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<MealDetail>> {
        self.meals.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
