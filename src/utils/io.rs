// I/O utilities for reading FLAC metadata

use std::io::Read;

/// Concatenate bytes most-significant-first into an unsigned integer.
///
/// An empty slice yields 0. Callers must pass at most 8 bytes; the widest
/// field read through this is the 36-bit STREAMINFO sample count.
pub fn be_bytes_to_u64(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() <= 8);
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

/// Read big-endian 24-bit integer
pub fn read_be_u24<R: Read>(reader: &mut R) -> std::io::Result<u32> {
    let mut buffer = [0u8; 3];
    reader.read_exact(&mut buffer)?;
    Ok(be_bytes_to_u64(&buffer) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_empty_slice_is_zero() {
        assert_eq!(be_bytes_to_u64(&[]), 0);
    }

    #[test]
    fn test_single_byte() {
        for b in [0u8, 1, 0x7F, 0xFF] {
            assert_eq!(be_bytes_to_u64(&[b]), u64::from(b));
        }
    }

    #[test]
    fn test_two_bytes() {
        assert_eq!(be_bytes_to_u64(&[0x01, 0x00]), 256);
        assert_eq!(be_bytes_to_u64(&[0xAB, 0xCD]), 0xABCD);
    }

    #[test]
    fn test_positional_weights() {
        // Equivalent to sum(byte_i * 256^(n-1-i))
        let bytes = [0x12u8, 0x34, 0x56, 0x78, 0x9A];
        let expected: u64 = bytes
            .iter()
            .enumerate()
            .map(|(i, &b)| u64::from(b) * 256u64.pow((bytes.len() - 1 - i) as u32))
            .sum();
        assert_eq!(be_bytes_to_u64(&bytes), expected);
    }

    #[test]
    fn test_36_bit_value() {
        assert_eq!(
            be_bytes_to_u64(&[0x0F, 0xFF, 0xFF, 0xFF, 0xFF]),
            (1u64 << 36) - 1
        );
    }

    #[test]
    fn test_read_be_u24() {
        let mut cursor = Cursor::new([0xFFu8, 0xFF, 0xFF]);
        assert_eq!(read_be_u24(&mut cursor).unwrap(), 0x00FF_FFFF);

        let mut cursor = Cursor::new([0x00u8, 0x00, 0x22]);
        assert_eq!(read_be_u24(&mut cursor).unwrap(), 34);
    }

    #[test]
    fn test_read_be_u24_truncated() {
        let mut cursor = Cursor::new([0x00u8, 0x01]);
        let err = read_be_u24(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }
}
