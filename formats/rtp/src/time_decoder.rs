use std::time::Duration;

/// Maps 32-bit RTP timestamps onto a monotonic presentation time.
///
/// The first decoded timestamp is the zero point. Differences are taken as
/// signed 32-bit values so a wraparound keeps the timeline continuous, and a
/// timestamp older than the previous one yields an earlier time without
/// moving the reference.
#[derive(Debug, Clone)]
pub struct RtpTimeDecoder {
    clock_rate: u32,
    initialized: bool,
    overall: i64,
    previous: u32,
}

impl RtpTimeDecoder {
    pub fn new(clock_rate: u32) -> Self {
        Self {
            clock_rate,
            initialized: false,
            overall: 0,
            previous: 0,
        }
    }

    pub fn clock_rate(&self) -> u32 {
        self.clock_rate
    }

    pub fn decode(&mut self, timestamp: u32) -> Duration {
        if !self.initialized {
            self.initialized = true;
            self.previous = timestamp;
            return Duration::ZERO;
        }

        let diff = timestamp.wrapping_sub(self.previous) as i32;
        if diff < 0 {
            return self.to_duration(self.overall + diff as i64);
        }

        self.previous = timestamp;
        self.overall += diff as i64;
        self.to_duration(self.overall)
    }

    fn to_duration(&self, ticks: i64) -> Duration {
        if ticks <= 0 || self.clock_rate == 0 {
            return Duration::ZERO;
        }
        let nanos = ticks as i128 * 1_000_000_000 / self.clock_rate as i128;
        Duration::from_nanos(nanos as u64)
    }
}
