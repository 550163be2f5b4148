use std::{
    net::{IpAddr, Ipv4Addr},
    time::Duration,
};

#[derive(Debug, Clone)]
pub struct RtspServerConfig {
    pub address: IpAddr,
    pub port: u16,
    /// idle limit for a connection without a session
    pub read_timeout_ms: u64,
    pub write_timeout_ms: u64,
    /// idle limit for a connection whose session is not playing
    pub session_timeout_ms: u64,
    /// interleaved frames queued per reader before new ones are dropped
    pub write_queue_capacity: usize,
}

impl Default for RtspServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8554,
            read_timeout_ms: 10_000,
            write_timeout_ms: 10_000,
            session_timeout_ms: 60_000,
            write_queue_capacity: 256,
        }
    }
}

impl RtspServerConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_millis(self.session_timeout_ms)
    }
}
