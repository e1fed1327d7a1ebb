//! Wall-clock handle shared between the SNTP task and the controller loop.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use glance_core::clock::{LocalTime, TickInstant};

/// Lock-free wall-clock anchor: epoch seconds paired with the uptime at
/// which they were observed.
///
/// Written by the single SNTP task, read by the controller loop. The two
/// cells are not updated atomically together; a torn read is off by at most
/// one resync step, which is noise at minute resolution.
#[derive(Debug)]
pub struct WallClockHandle {
    epoch_at_sync: AtomicU32,
    uptime_secs_at_sync: AtomicU32,
    synced: AtomicBool,
}

impl WallClockHandle {
    pub const fn new() -> Self {
        Self {
            epoch_at_sync: AtomicU32::new(0),
            uptime_secs_at_sync: AtomicU32::new(0),
            synced: AtomicBool::new(false),
        }
    }

    /// Anchors the wall clock to `epoch_secs` as of `uptime_ms`.
    pub fn publish(&self, epoch_secs: u32, uptime_ms: u64) {
        self.epoch_at_sync.store(epoch_secs, Ordering::Release);
        self.uptime_secs_at_sync
            .store((uptime_ms / 1_000) as u32, Ordering::Release);
        self.synced.store(true, Ordering::Release);
    }

    pub fn synced(&self) -> bool {
        self.synced.load(Ordering::Acquire)
    }

    /// Local civil time at `uptime_ms`, or `None` before the first sync.
    pub fn local(&self, uptime_ms: u64, tz_offset_minutes: i32) -> Option<LocalTime> {
        if !self.synced() {
            return None;
        }

        let anchor = self.epoch_at_sync.load(Ordering::Acquire) as u64;
        let anchor_uptime = self.uptime_secs_at_sync.load(Ordering::Acquire) as u64;
        let epoch = anchor + (uptime_ms / 1_000).saturating_sub(anchor_uptime);

        Some(LocalTime::from_epoch(epoch, tz_offset_minutes))
    }

    /// Controller tick timestamp, once the clock is anchored.
    pub fn tick_instant(&self, uptime_ms: u64, tz_offset_minutes: i32) -> Option<TickInstant> {
        self.local(uptime_ms, tz_offset_minutes)
            .map(|local| TickInstant::new(uptime_ms, local))
    }
}

impl Default for WallClockHandle {
    fn default() -> Self {
        Self::new()
    }
}
