use crate::traits::writer::WriteTo;

/// Decodes an even-length hex string, `None` on odd length or non-hex digits.
pub fn hex_to_bytes(s: &str) -> Option<Vec<u8>> {
    if !s.len().is_multiple_of(2) || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            s.get(i..i + 2)
                .and_then(|sub| u8::from_str_radix(sub, 16).ok())
        })
        .collect()
}

/// Lowercase hex, the inverse of [`hex_to_bytes`].
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn writable_to_bytes<E, T: WriteTo<Vec<u8>, Error = E>>(writable: &T) -> Result<Vec<u8>, E> {
    let mut bytes = vec![];
    writable.write_to(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::{bytes_to_hex, hex_to_bytes};

    #[test]
    fn test_hex_to_bytes() {
        assert_eq!(hex_to_bytes("001a"), Some(vec![0x00, 0x1A]));
        assert_eq!(hex_to_bytes("FFab"), Some(vec![0xFF, 0xAB]));
        assert_eq!(hex_to_bytes("abc"), None);
        assert_eq!(hex_to_bytes("zz"), None);
        assert_eq!(hex_to_bytes("+1+2"), None);
        assert_eq!(hex_to_bytes("-1"), None);
        assert_eq!(hex_to_bytes(""), Some(vec![]));
        assert_eq!(bytes_to_hex(&[0x11, 0x90, 0x0A]), "11900a");
    }
}
