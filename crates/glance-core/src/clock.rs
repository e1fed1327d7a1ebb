//! Local wall-clock types and the market/working-hours gating predicates.
//!
//! All gating is host-local time; the firmware applies a fixed timezone
//! offset to SNTP epoch seconds and nothing here is timezone-aware beyond
//! that.

/// Day of week, Monday-first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Monday-first index 0..=6.
    pub const fn index(self) -> u8 {
        self as u8
    }

    const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Monday,
            1 => Self::Tuesday,
            2 => Self::Wednesday,
            3 => Self::Thursday,
            4 => Self::Friday,
            5 => Self::Saturday,
            _ => Self::Sunday,
        }
    }

    pub const fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }
}

/// A local civil time, minute resolution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LocalTime {
    pub weekday: Weekday,
    pub hour: u8,
    pub minute: u8,
}

impl LocalTime {
    pub const fn new(weekday: Weekday, hour: u8, minute: u8) -> Self {
        Self {
            weekday,
            hour,
            minute,
        }
    }

    /// Converts Unix epoch seconds plus a fixed offset into local civil time.
    ///
    /// Only weekday/hour/minute are derived; the calendar date is never
    /// needed by the controller.
    pub fn from_epoch(unix_secs: u64, tz_offset_minutes: i32) -> Self {
        let local_secs =
            (unix_secs as i64).saturating_add(tz_offset_minutes as i64 * 60);
        let days = local_secs.div_euclid(86_400);
        let secs_of_day = local_secs.rem_euclid(86_400);

        // 1970-01-01 was a Thursday; Monday-first index 3.
        let weekday = Weekday::from_index(((days + 3).rem_euclid(7)) as u8);

        Self {
            weekday,
            hour: (secs_of_day / 3_600) as u8,
            minute: ((secs_of_day / 60) % 60) as u8,
        }
    }

    /// Minutes past local midnight.
    pub const fn minute_of_day(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

/// One controller tick's view of time: monotonic uptime for cadence
/// bookkeeping, local civil time for gating and the clock face.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TickInstant {
    pub uptime_ms: u64,
    pub local: LocalTime,
}

impl TickInstant {
    pub const fn new(uptime_ms: u64, local: LocalTime) -> Self {
        Self { uptime_ms, local }
    }
}

const MARKET_OPEN_FROM: u16 = 8 * 60 + 55;
const MARKET_OPEN_UNTIL: u16 = 16 * 60 + 55;
const QUIET_FROM: u16 = 5;
const QUIET_UNTIL: u16 = 9 * 60;

/// True on weekdays between 08:55 and 16:55 local, bounds inclusive.
pub fn market_open(local: LocalTime) -> bool {
    if local.weekday.is_weekend() {
        return false;
    }

    let t = local.minute_of_day();
    (MARKET_OPEN_FROM..=MARKET_OPEN_UNTIL).contains(&t)
}

/// True outside the overnight quiet window 00:05..=09:00 local; the posture
/// reminder only fires while this holds.
pub fn working_time(local: LocalTime) -> bool {
    let t = local.minute_of_day();
    !(QUIET_FROM..=QUIET_UNTIL).contains(&t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_zero_is_thursday_midnight() {
        let t = LocalTime::from_epoch(0, 0);
        assert_eq!(t.weekday, Weekday::Thursday);
        assert_eq!((t.hour, t.minute), (0, 0));
    }

    #[test]
    fn negative_offset_crosses_midnight_and_weekday() {
        // 2021-01-04 00:30 UTC (a Monday) minus one hour is Sunday 23:30.
        let monday_0030 = 1_609_720_200;
        let t = LocalTime::from_epoch(monday_0030, -60);
        assert_eq!(t.weekday, Weekday::Sunday);
        assert_eq!((t.hour, t.minute), (23, 30));
    }

    #[test]
    fn market_open_bounds_are_inclusive() {
        let monday = |h, m| LocalTime::new(Weekday::Monday, h, m);

        assert!(!market_open(monday(8, 54)));
        assert!(market_open(monday(8, 55)));
        assert!(market_open(monday(12, 0)));
        assert!(market_open(monday(16, 55)));
        assert!(!market_open(monday(16, 56)));
    }

    #[test]
    fn market_is_closed_on_weekends() {
        assert!(!market_open(LocalTime::new(Weekday::Saturday, 12, 0)));
        assert!(!market_open(LocalTime::new(Weekday::Sunday, 12, 0)));
    }

    #[test]
    fn quiet_window_suppresses_working_time() {
        let tuesday = |h, m| LocalTime::new(Weekday::Tuesday, h, m);

        assert!(working_time(tuesday(0, 4)));
        assert!(!working_time(tuesday(0, 5)));
        assert!(!working_time(tuesday(6, 0)));
        assert!(!working_time(tuesday(9, 0)));
        assert!(working_time(tuesday(9, 1)));
        assert!(working_time(tuesday(23, 59)));
    }
}
