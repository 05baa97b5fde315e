//! Low-level bit helpers shared by [crate::sequence::BitSequence] and the generator.
//!
//! Bits are addressed in MSB-first order: bit 0 is the high bit of the first byte.

/// Reads a single bit at `bit_pos` (0 = MSB of first byte). Returns `None` past the end.
pub fn read_bit_at(data: &[u8], bit_pos: usize) -> Option<u8> {
    let byte = data.get(bit_pos / 8)?;
    Some((byte >> (7 - bit_pos % 8)) & 1)
}

/// Packs `bits` as a big-endian number, left-zero-padded to a whole number of bytes.
///
/// `[1, 1, 0]` becomes `[0b0000_0110]`.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let n_bytes = bits.len().div_ceil(8);
    let pad = n_bytes * 8 - bits.len();
    let mut out = vec![0u8; n_bytes];

    for (i, &bit) in bits.iter().enumerate() {
        let pos = pad + i;
        out[pos / 8] |= bit << (7 - pos % 8);
    }

    out
}

/// Unpacks the trailing `n_bits` bits of `data`, the inverse of [bits_to_bytes].
pub fn bytes_to_bits(data: &[u8], n_bits: usize) -> Option<Vec<u8>> {
    let start = (data.len() * 8).checked_sub(n_bits)?;
    (start..start + n_bits)
        .map(|pos| read_bit_at(data, pos))
        .collect()
}

/// Maps an ASCII binary digit to its bit value.
pub fn digit_to_bit(c: char) -> Option<u8> {
    match c {
        '0' => Some(0),
        '1' => Some(1),
        _ => None,
    }
}

/// Shannon entropy in bits per symbol of a binary source with `ones` set bits out of `len`.
pub fn binary_entropy(ones: usize, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }

    let p1 = ones as f64 / len as f64;
    let p0 = 1.0 - p1;

    [p1, p0]
        .into_iter()
        .filter(|&p| p > 0.0)
        .fold(0.0, |acc, p| acc - p * p.log2())
}

/// Rounds `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bit_at() {
        let data = [0b1000_0001];
        assert_eq!(read_bit_at(&data, 0), Some(1));
        assert_eq!(read_bit_at(&data, 1), Some(0));
        assert_eq!(read_bit_at(&data, 7), Some(1));
    }

    #[test]
    fn test_read_bit_at_out_of_bounds() {
        assert_eq!(read_bit_at(&[0xff], 8), None);
    }

    #[test]
    fn test_bits_to_bytes_pads_left() {
        assert_eq!(bits_to_bytes(&[1]), vec![0x01]);
        assert_eq!(bits_to_bytes(&[1, 1, 0]), vec![0x06]);
        assert_eq!(bits_to_bytes(&[1, 1, 1, 0, 0, 0, 1, 0, 1]), vec![0x01, 0xc5]);
    }

    #[test]
    fn test_bits_to_bytes_whole_byte() {
        assert_eq!(bits_to_bytes(&[1, 0, 1, 0, 1, 0, 1, 0]), vec![0xaa]);
    }

    #[test]
    fn test_bytes_to_bits() {
        assert_eq!(bytes_to_bits(&[0x06], 3), Some(vec![1, 1, 0]));
        assert_eq!(
            bytes_to_bits(&[0x01, 0xc5], 9),
            Some(vec![1, 1, 1, 0, 0, 0, 1, 0, 1])
        );
    }

    #[test]
    fn test_bytes_to_bits_too_long() {
        assert_eq!(bytes_to_bits(&[0x06], 9), None);
    }

    #[test]
    fn test_digit_to_bit() {
        assert_eq!(digit_to_bit('0'), Some(0));
        assert_eq!(digit_to_bit('1'), Some(1));
        assert_eq!(digit_to_bit('2'), None);
    }

    #[test]
    fn test_binary_entropy() {
        assert_eq!(binary_entropy(0, 0), 0.0);
        assert_eq!(binary_entropy(4, 4), 0.0);
        assert_eq!(binary_entropy(2, 4), 1.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.571428, 3), 0.571);
        assert_eq!(round_to(0.98522814, 5), 0.98523);
    }
}
