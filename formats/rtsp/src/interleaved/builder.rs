use tokio_util::bytes::Bytes;

use super::RtspInterleavedPacket;

#[derive(Debug, Default)]
pub struct RtspInterleavedPacketBuilder {
    channel_id: u8,
    payload: Bytes,
}

impl RtspInterleavedPacketBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(mut self, channel_id: u8) -> Self {
        self.channel_id = channel_id;
        self
    }

    pub fn payload<B: Into<Bytes>>(mut self, payload: B) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn build(self) -> RtspInterleavedPacket {
        RtspInterleavedPacket::new(self.channel_id, self.payload)
    }
}
