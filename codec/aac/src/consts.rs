/// Upper bound for a reassembled MPEG-4 audio access unit, in bytes.
pub const MAX_ACCESS_UNIT_SIZE: usize = 5 * 1024;

/// PCM samples carried by one AAC-LC access unit.
pub const SAMPLES_PER_ACCESS_UNIT: u32 = 1024;

/// Audio object type of AAC low complexity, the only one carried in ADTS here.
pub const OBJECT_TYPE_AAC_LC: u8 = 2;

pub const ADTS_HEADER_SIZE: usize = 7;
