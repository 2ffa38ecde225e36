use chrono::Utc;
use lp_core::ports::ClockPort;

/// Wall clock in Unix milliseconds.
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
