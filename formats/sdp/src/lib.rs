//! Session descriptions (RFC 8866) as exchanged by DESCRIBE and ANNOUNCE.

pub mod attributes;
pub mod errors;
pub mod reader;
pub mod session;
#[cfg(test)]
mod test;

pub const CRLF: &str = "\r\n";
pub const LF: &str = "\n";
