//! Periodic re-evaluation of the current slot.
//!
//! [`current_slot`] is a pure function of `(shift_type, now)` and knows
//! nothing about time passing. A caller that needs a live value owns a
//! [`CurrentSlotWatcher`], which polls on a fixed interval and publishes
//! changes on a `tokio::sync::watch` channel. There is no other
//! notification: a slot change becomes visible on the next tick.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::calculation::current_slot;
use crate::config::ShiftCatalog;
use crate::error::EngineResult;
use crate::models::{ShiftType, TimeSlot};

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    /// The current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// The system's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that returns whatever time it was last set to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    /// Creates a clock stopped at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: NaiveDateTime) {
        let mut guard = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Shortest polling interval a watcher will use.
pub const MIN_POLLING_INTERVAL: Duration = Duration::from_millis(1);

/// Polls [`current_slot`] for one shift type and publishes changes.
pub struct CurrentSlotWatcher {
    catalog: Arc<ShiftCatalog>,
    shift_type: ShiftType,
    clock: Arc<dyn Clock>,
    interval: Duration,
    sender: watch::Sender<Option<TimeSlot>>,
}

impl CurrentSlotWatcher {
    /// Creates a watcher and the receiver its results are published on.
    ///
    /// The receiver starts at `None` until the first evaluation. Intervals
    /// shorter than [`MIN_POLLING_INTERVAL`] are raised to it.
    pub fn new(
        catalog: Arc<ShiftCatalog>,
        shift_type: ShiftType,
        clock: Arc<dyn Clock>,
        interval: Duration,
    ) -> (Self, watch::Receiver<Option<TimeSlot>>) {
        let (sender, receiver) = watch::channel(None);
        let watcher = Self {
            catalog,
            shift_type,
            clock,
            interval: interval.max(MIN_POLLING_INTERVAL),
            sender,
        };
        (watcher, receiver)
    }

    /// Creates a watcher using the catalog's configured polling interval.
    pub fn with_catalog_interval(
        catalog: Arc<ShiftCatalog>,
        shift_type: ShiftType,
        clock: Arc<dyn Clock>,
    ) -> (Self, watch::Receiver<Option<TimeSlot>>) {
        let interval = Duration::from_secs(catalog.settings().polling_interval_secs.max(1));
        Self::new(catalog, shift_type, clock, interval)
    }

    /// Evaluates the current slot once and publishes it if it changed.
    ///
    /// Returns whether the published value changed.
    pub fn evaluate_once(&self) -> EngineResult<bool> {
        let now = self.clock.now();
        let slot = current_slot(&self.catalog, self.shift_type, now)?;

        let changed = self.sender.send_if_modified(|published| {
            if *published == slot {
                false
            } else {
                *published = slot.clone();
                true
            }
        });

        if changed {
            info!(
                shift_type = %self.shift_type,
                current_slot = slot.as_ref().map(|s| s.label.as_str()).unwrap_or("none"),
                "Current time slot changed"
            );
        } else {
            debug!(shift_type = %self.shift_type, "Current time slot unchanged");
        }

        Ok(changed)
    }

    /// Polls until every receiver is dropped.
    ///
    /// The first evaluation happens immediately. A catalog error ends the
    /// loop and is returned.
    pub async fn run(self) -> EngineResult<()> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.evaluate_once()?;
                }
                _ = self.sender.closed() => {
                    debug!(shift_type = %self.shift_type, "All receivers dropped, stopping watcher");
                    return Ok(());
                }
            }
        }
    }

    /// Runs the watcher on the tokio runtime.
    pub fn spawn(self) -> JoinHandle<EngineResult<()>> {
        tokio::spawn(self.run())
    }
}
