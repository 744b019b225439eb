/*!
Byte classification for the parser's hot loops.
*/

// bit 0 (0x01): plain string byte: ASCII, at least 0x20, not `"` or `\`
// bit 1 (0x02): whitespace
#[rustfmt::skip]
pub(super) const PARSE_FLAGS: [u8; 256] = [
 // 0  1  2  3  4  5  6  7     8  9  A  B  C  D  E  F
    0, 0, 0, 0, 0, 0, 0, 0,    0, 2, 2, 0, 0, 2, 0, 0, // 0
    0, 0, 0, 0, 0, 0, 0, 0,    0, 0, 0, 0, 0, 0, 0, 0, // 1
    3, 1, 0, 1, 1, 1, 1, 1,    1, 1, 1, 1, 1, 1, 1, 1, // 2
    1, 1, 1, 1, 1, 1, 1, 1,    1, 1, 1, 1, 1, 1, 1, 1, // 3
    1, 1, 1, 1, 1, 1, 1, 1,    1, 1, 1, 1, 1, 1, 1, 1, // 4
    1, 1, 1, 1, 1, 1, 1, 1,    1, 1, 1, 1, 0, 1, 1, 1, // 5
    1, 1, 1, 1, 1, 1, 1, 1,    1, 1, 1, 1, 1, 1, 1, 1, // 6
    1, 1, 1, 1, 1, 1, 1, 1,    1, 1, 1, 1, 1, 1, 1, 1, // 7

 // 128-255
    0, 0, 0, 0, 0, 0, 0, 0,    0, 0, 0, 0, 0, 0, 0, 0, // 8
    0, 0, 0, 0, 0, 0, 0, 0,    0, 0, 0, 0, 0, 0, 0, 0, // 9
    0, 0, 0, 0, 0, 0, 0, 0,    0, 0, 0, 0, 0, 0, 0, 0, // A
    0, 0, 0, 0, 0, 0, 0, 0,    0, 0, 0, 0, 0, 0, 0, 0, // B
    0, 0, 0, 0, 0, 0, 0, 0,    0, 0, 0, 0, 0, 0, 0, 0, // C
    0, 0, 0, 0, 0, 0, 0, 0,    0, 0, 0, 0, 0, 0, 0, 0, // D
    0, 0, 0, 0, 0, 0, 0, 0,    0, 0, 0, 0, 0, 0, 0, 0, // E
    0, 0, 0, 0, 0, 0, 0, 0,    0, 0, 0, 0, 0, 0, 0, 0, // F
];

#[inline]
pub(super) fn is_plain_string_byte(b: u8) -> bool {
    PARSE_FLAGS[b as usize] & 1 != 0
}

#[inline]
pub(super) fn is_whitespace(b: u8) -> bool {
    PARSE_FLAGS[b as usize] & 2 != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_match_predicates() {
        for b in 0..=255u8 {
            let plain = b >= 0x20 && b < 0x80 && b != b'"' && b != b'\\';
            assert_eq!(plain, is_plain_string_byte(b), "byte {:#04x}", b);

            let whitespace = matches!(b, b' ' | b'\t' | b'\n' | b'\r');
            assert_eq!(whitespace, is_whitespace(b), "byte {:#04x}", b);
        }
    }
}
