/*!
String scanning and in-place unescaping.

The fast path strides over plain bytes four at a time and hands the string
back as a `[start, end)` range over the untouched buffer. The first escape
(or byte past ASCII) drops to the slow path, which keeps a write cursor
trailing the read cursor and compacts decoded bytes down over the escape
sequences they came from. A decoded escape is never longer than its source,
so the write cursor can't overtake the read cursor.
*/

use crate::{
    error::{ErrorCode, RawError},
    parse::{flags, Parser},
    std_ext,
};

impl<'a> Parser<'a> {
    /**
    Parse the string whose opening quote is at `p`.

    Returns the cursor past the closing quote and the decoded `[start, end)`
    byte range within the buffer.
    */
    pub(super) fn parse_string(&mut self, p: usize) -> Result<(usize, usize, usize), RawError> {
        let start = p + 1;
        let p = self.scan_plain(start);

        if p == self.input.len() {
            return Err(self.unexpected_end());
        }

        let b = *get_unchecked!(self.input, p);

        if b == b'"' {
            return Ok((p + 1, start, p));
        }

        if b < 0x20 {
            return Err(RawError::with_arg(p, ErrorCode::IllegalCodepoint, b as i32));
        }

        // a backslash, or a byte past ASCII
        self.parse_string_slow(p, start)
    }

    /**
    Advance over plain string bytes, four at a stride.
    */
    #[inline]
    fn scan_plain(&self, mut p: usize) -> usize {
        while self.input.len() - p >= 4 {
            if !flags::is_plain_string_byte(*get_unchecked!(self.input, p)) {
                return p;
            }
            if !flags::is_plain_string_byte(*get_unchecked!(self.input, p + 1)) {
                return p + 1;
            }
            if !flags::is_plain_string_byte(*get_unchecked!(self.input, p + 2)) {
                return p + 2;
            }
            if !flags::is_plain_string_byte(*get_unchecked!(self.input, p + 3)) {
                return p + 3;
            }

            p += 4;
        }

        while p < self.input.len() && flags::is_plain_string_byte(*get_unchecked!(self.input, p)) {
            p += 1;
        }

        p
    }

    fn parse_string_slow(
        &mut self,
        mut p: usize,
        start: usize,
    ) -> Result<(usize, usize, usize), RawError> {
        let mut end = p;

        loop {
            if p == self.input.len() {
                return Err(self.unexpected_end());
            }

            let b = *get_unchecked!(self.input, p);

            if b < 0x20 {
                return Err(RawError::with_arg(p, ErrorCode::IllegalCodepoint, b as i32));
            }

            match b {
                b'"' => return Ok((p + 1, start, end)),
                b'\\' => {
                    p += 1;
                    if p == self.input.len() {
                        return Err(self.unexpected_end());
                    }

                    let escape = *get_unchecked!(self.input, p);

                    if escape == b'u' {
                        let (next, decoded) = self.parse_unicode_escape(p + 1)?;
                        p = next;

                        // a `\uXXXX` escape spans at least six bytes, so the
                        // write cursor stays clear of the read cursor even
                        // for four-byte characters
                        end += decoded
                            .encode_utf8(get_unchecked_mut!(self.input, end..end + 4))
                            .len();
                    } else {
                        let replacement = match escape {
                            b'"' => b'"',
                            b'\\' => b'\\',
                            b'/' => b'/',
                            b'b' => 0x08,
                            b'f' => 0x0c,
                            b'n' => b'\n',
                            b'r' => b'\r',
                            b't' => b'\t',
                            _ => return Err(RawError::new(p, ErrorCode::UnknownEscape)),
                        };

                        *get_unchecked_mut!(self.input, end) = replacement;
                        end += 1;
                        p += 1;
                    }
                }
                _ => {
                    // plain bytes and bytes past ASCII pass through unchanged
                    *get_unchecked_mut!(self.input, end) = b;
                    end += 1;
                    p += 1;
                }
            }
        }
    }

    /**
    Decode a `\u` escape with the cursor at its first hex digit, combining
    UTF-16 surrogate pairs. Lone surrogates of either kind are rejected.
    */
    fn parse_unicode_escape(&self, mut p: usize) -> Result<(usize, char), RawError> {
        if self.input.len() - p < 4 {
            return Err(self.unexpected_end());
        }

        let first = self.read_hex(p)?;
        p += 4;

        if (0xD800..=0xDBFF).contains(&first) {
            // a lead surrogate must be followed by an escaped trail surrogate
            if self.input.len() - p < 6 {
                return Err(RawError::new(
                    self.input.len(),
                    ErrorCode::UnexpectedEndOfUtf16,
                ));
            }

            if *get_unchecked!(self.input, p) != b'\\'
                || *get_unchecked!(self.input, p + 1) != b'u'
            {
                return Err(RawError::new(p, ErrorCode::ExpectedU));
            }
            p += 2;

            let second = self.read_hex(p)?;
            p += 4;

            let decoded = std_ext::char::from_utf16_surrogate_pair(first, second)
                .map_err(|_| RawError::new(p, ErrorCode::InvalidUtf16TrailSurrogate))?;

            return Ok((p, decoded));
        }

        match char::from_u32(first as u32) {
            Some(decoded) => Ok((p, decoded)),
            // a lone trail surrogate
            None => Err(RawError::new(p, ErrorCode::InvalidUtf16TrailSurrogate)),
        }
    }

    /**
    Read four hex digits at `p`.
    */
    fn read_hex(&self, p: usize) -> Result<u16, RawError> {
        let mut value = 0u16;

        for i in 0..4 {
            let c = *get_unchecked!(self.input, p + i);

            let digit = match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => return Err(RawError::new(p + i, ErrorCode::InvalidUnicodeEscape)),
            };

            value = (value << 4) + digit as u16;
        }

        Ok(value)
    }
}
