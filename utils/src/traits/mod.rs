pub mod buffer;
pub mod dynamic_sized_packet;
pub mod reader;
pub mod writer;
