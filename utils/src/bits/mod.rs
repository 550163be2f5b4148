#[inline]
pub const fn bool_from_bit(value: u8) -> bool {
    (value & 0b1) == 0b1
}

#[inline]
pub const fn bool_to_bit(value: bool) -> u8 {
    if value { 0b1 } else { 0b0 }
}

/// Number of whole bytes needed to hold `bits` bits.
#[inline]
pub const fn bits_to_bytes_ceil(bits: usize) -> usize {
    bits.div_ceil(8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_to_bytes() {
        assert_eq!(bits_to_bytes_ceil(0), 0);
        assert_eq!(bits_to_bytes_ceil(1), 1);
        assert_eq!(bits_to_bytes_ceil(16), 2);
        assert_eq!(bits_to_bytes_ceil(17), 3);
        assert!(bool_from_bit(0b11));
        assert_eq!(bool_to_bit(false), 0);
    }
}
