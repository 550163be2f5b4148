pub mod codec;
pub mod errors;
pub mod header;
pub mod packet;
pub mod time_decoder;
