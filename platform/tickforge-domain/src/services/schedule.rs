use chrono::{DateTime, Duration, Utc};

const MINUTES_PER_HOUR: u32 = 60;

/// How many ticks each symbol gets and how far apart they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    pub days: u32,
    /// Ticks per symbol per simulated day.
    pub rate: u32,
}

impl TickSchedule {
    pub fn new(days: u32, rate: u32) -> Self {
        Self { days, rate }
    }

    pub fn ticks_per_symbol(&self) -> u64 {
        u64::from(self.days) * u64::from(self.rate)
    }

    pub fn expected_rows(&self, symbols: usize) -> u64 {
        (symbols as u64).saturating_mul(self.ticks_per_symbol())
    }

    /// Cursor advance between two ticks, in whole minutes (floor division).
    pub fn step_minutes(&self) -> i64 {
        i64::from(MINUTES_PER_HOUR / self.rate.max(1))
    }

    pub fn step(&self) -> Duration {
        Duration::minutes(self.step_minutes())
    }

    /// Above 60 ticks per day the whole-minute step floors to zero and every
    /// tick of a symbol shares the start timestamp.
    pub fn collides(&self) -> bool {
        self.rate > MINUTES_PER_HOUR
    }
}

pub fn start_instant(now: DateTime<Utc>, days: u32) -> Result<DateTime<Utc>, String> {
    now.checked_sub_signed(Duration::days(i64::from(days)))
        .ok_or_else(|| format!("days={days} moves the start instant out of range"))
}
