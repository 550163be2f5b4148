pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';
pub const CRLF_STR: &str = "\r\n";
pub const COLON_STR: &str = ":";
