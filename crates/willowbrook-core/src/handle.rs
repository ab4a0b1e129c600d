//! Shared access to one simulation from many callers.
//!
//! The handle wraps the [`Simulation`] in [`Arc`] and [`Mutex`] so an API
//! layer can clone it into every request. Mutating calls use
//! [`Mutex::try_lock`]: while a day is being advanced, a second advance or
//! an action is turned away with a `Conflict` error instead of queueing
//! behind it. Reads wait for the lock.

use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use tracing::{error, warn};
use willowbrook_types::{DailyReport, WeatherState};

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::orchestrator::Simulation;
use crate::status::SimulationStatus;

/// A cloneable, thread-safe handle to a running game.
#[derive(Debug, Clone)]
pub struct SimulationHandle {
    inner: Arc<Mutex<Simulation>>,
}

impl SimulationHandle {
    /// Build a game from `config` and wrap it.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        Ok(Self::from_simulation(Simulation::new(config)?))
    }

    /// Wrap an existing game.
    pub fn from_simulation(simulation: Simulation) -> Self {
        Self {
            inner: Arc::new(Mutex::new(simulation)),
        }
    }

    fn try_acquire(&self) -> Result<MutexGuard<'_, Simulation>, SimulationError> {
        match self.inner.try_lock() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::WouldBlock) => {
                warn!("Simulation busy, request rejected");
                Err(SimulationError::Busy)
            }
            Err(TryLockError::Poisoned(err)) => {
                error!(%err, "Simulation lock poisoned");
                Err(SimulationError::LockPoisoned)
            }
        }
    }

    fn acquire(&self) -> Result<MutexGuard<'_, Simulation>, SimulationError> {
        match self.inner.lock() {
            Ok(guard) => Ok(guard),
            Err(err) => {
                error!(%err, "Simulation lock poisoned");
                Err(SimulationError::LockPoisoned)
            }
        }
    }

    /// Advance one day, unless another caller is using the game.
    pub fn advance_day(&self) -> Result<DailyReport, SimulationError> {
        self.try_acquire()?.advance_day()
    }

    /// Restart with `seed`, unless another caller is using the game.
    pub fn new_game(&self, seed: u64) -> Result<(), SimulationError> {
        self.try_acquire()?.new_game(seed)
    }

    /// Run a player action, unless another caller is using the game.
    ///
    /// ```ignore
    /// handle.act(|sim| sim.feed("Biscuit"))?;
    /// ```
    pub fn act<T>(
        &self,
        action: impl FnOnce(&mut Simulation) -> Result<T, SimulationError>,
    ) -> Result<T, SimulationError> {
        let mut guard = self.try_acquire()?;
        action(&mut guard)
    }

    /// Snapshot the game, waiting for any advance in flight to finish.
    pub fn status(&self) -> Result<SimulationStatus, SimulationError> {
        Ok(self.acquire()?.status())
    }

    /// Forecast without touching the game.
    pub fn forecast(&self, days: usize) -> Result<Vec<WeatherState>, SimulationError> {
        self.acquire()?.forecast(days)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::thread;

    use willowbrook_types::ErrorKind;

    use super::*;

    #[test]
    fn advances_through_the_handle() {
        let handle = SimulationHandle::new(SimulationConfig::default()).unwrap();
        assert_eq!(handle.advance_day().unwrap().day, 1);
        assert_eq!(handle.status().unwrap().day, 1);
    }

    #[test]
    fn second_advance_is_turned_away_while_one_holds_the_game() {
        let handle = SimulationHandle::new(SimulationConfig::default()).unwrap();
        let outer = handle.clone();

        let nested = outer
            .act(|sim| {
                let err = handle.advance_day().unwrap_err();
                assert_eq!(err.kind(), ErrorKind::Conflict);
                Ok(sim.day())
            })
            .unwrap();
        assert_eq!(nested, 0);
        assert_eq!(handle.advance_day().unwrap().day, 1);
    }

    #[test]
    fn clones_share_one_game_across_threads() {
        let handle = SimulationHandle::new(SimulationConfig::default()).unwrap();
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let handle = handle.clone();
                thread::spawn(move || {
                    let mut advanced = 0_u64;
                    for _ in 0..5 {
                        if handle.advance_day().is_ok() {
                            advanced = advanced.saturating_add(1);
                        }
                    }
                    advanced
                })
            })
            .collect();

        let total: u64 = workers.into_iter().map(|w| w.join().unwrap()).sum();
        assert_eq!(handle.status().unwrap().day, total);
    }
}
