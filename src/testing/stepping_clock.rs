use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::ports::Clock;

/// Clock that starts at a fixed instant and advances by `step` per reading.
#[derive(Clone, Debug)]
pub struct SteppingClock {
    current: Arc<Mutex<DateTime<Utc>>>,
    step: Duration,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self { current: Arc::new(Mutex::new(start)), step }
    }

    /// Frozen at 2026-10-19T14:25:01Z.
    pub fn fixed() -> Self {
        Self::new(Self::epoch(), Duration::zero())
    }

    /// Starts at 2026-10-19T14:25:01Z and ticks one second per reading.
    pub fn ticking() -> Self {
        Self::new(Self::epoch(), Duration::seconds(1))
    }

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 14, 25, 1).unwrap()
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut current = self.current.lock().unwrap();
        let now = *current;
        *current = now + self.step;
        now
    }
}
