/*!
The parser.

The parser walks the input once, keeping open containers as scratch frames
at the low end of the structure region and finished values as an arena at
the high end. It isn't recursive: nesting depth costs one frame header word,
not stack.

```text
[ frame | frame | frame | write ->   ...gap...   <- out | value | value ]
```

A frame starts with a header word recording the parent's kind and base
index, followed by one tagged word per already-parsed child (three words per
object entry: the key's decoded byte range and then the value word). While a
child is pending in its frame, its payload is the child's distance from the
region's *high end*, which growth under the dynamic strategy preserves.

Closing a container *installs* it: the frame's words move to the arena just
below `out`, pending payloads are rebased into offsets from the container's
own header (what [`Value`] navigates by), a length word is prepended, and
the frame's slots are handed back to the parent. An install writes exactly
as many words as the frame it drains, so it can never exhaust the region.
Closing the outermost container rewrites its frame in place at the bottom
of the region instead, which is why both cursors end a successful parse on
the root's header word.
*/

mod flags;
mod number;
mod string;

mod document;
mod value;

pub use self::{document::Document, value::Value};

use crate::{
    alloc::{AllocationStrategy, Structure},
    ast::{self, Kind, ObjectKeyRecord, ROOT_MARKER},
    buffer::Buffer,
    error::{ErrorCode, RawError},
};

/**
Parse a buffer into a [`Document`].

The returned document holds either the parsed root or the error the input
failed with; it keeps the buffer either way.
*/
pub fn parse(strategy: AllocationStrategy, mut buffer: Buffer) -> Document {
    // word payloads have to be able to address the structure region
    if buffer.len() > ast::PAYLOAD_MASK {
        let error = RawError::new(0, ErrorCode::OutOfMemory).locate(buffer.bytes());
        return Document::failed(buffer, error);
    }

    let structure = match Structure::for_input(strategy, buffer.len()) {
        Ok(structure) => structure,
        Err(_) => {
            let error = RawError::new(0, ErrorCode::OutOfMemory).locate(buffer.bytes());
            return Document::failed(buffer, error);
        }
    };

    let mut parser = Parser {
        input: buffer.bytes_mut(),
        structure,
    };

    let result = parser.document();
    let structure = parser.structure;

    match result {
        Ok((root_type, root)) => {
            Document::parsed(buffer, structure.into_words(), root_type, root)
        }
        Err(raw) => {
            // the structure region is released before the document is built
            drop(structure);

            let error = raw.locate(buffer.bytes());
            Document::failed(buffer, error)
        }
    }
}

pub(crate) struct Parser<'a> {
    pub(crate) input: &'a mut [u8],
    pub(crate) structure: Structure,
}

impl<'a> Parser<'a> {
    /**
    Drive the outer loop over container frames.

    Returns the root's kind and its header word index.
    */
    fn document(&mut self) -> Result<(Kind, usize), RawError> {
        let mut p = match self.skip_whitespace(0) {
            Some(p) => p,
            None => return Err(RawError::new(self.input.len(), ErrorCode::MissingRootElement)),
        };

        let mut current_type = match *get_unchecked!(self.input, p) {
            b'[' => Kind::Array,
            b'{' => Kind::Object,
            _ => return Err(RawError::new(p, ErrorCode::BadRoot)),
        };

        let mut current_base = 0;
        self.reserve(1, p)?;
        self.structure.push(ast::make_word(current_type, ROOT_MARKER));

        let mut had_comma = false;
        // entering a frame skips the comma step and hops over the bracket
        let mut fresh = true;

        loop {
            let mut closing = false;

            if fresh {
                fresh = false;
            } else {
                p = match self.skip_whitespace(p) {
                    Some(p) => p,
                    None => return Err(self.unexpected_end()),
                };

                let closer = if current_type == Kind::Object { b'}' } else { b']' };
                let b = *get_unchecked!(self.input, p);

                if b == closer {
                    closing = true;
                } else if b != b',' {
                    return Err(RawError::new(p, ErrorCode::ExpectedComma));
                } else {
                    had_comma = true;
                }
            }

            if !closing {
                // hop over the comma, or the bracket that opened this frame
                p = match self.skip_whitespace(p + 1) {
                    Some(p) => p,
                    None => return Err(self.unexpected_end()),
                };

                if current_type == Kind::Object && *get_unchecked!(self.input, p) != b'}' {
                    if *get_unchecked!(self.input, p) != b'"' {
                        return Err(RawError::new(p, ErrorCode::MissingObjectKey));
                    }

                    let (next, key_start, key_end) = self.parse_string(p)?;
                    p = next;

                    self.reserve(2, p)?;
                    self.structure.push(key_start);
                    self.structure.push(key_end);

                    p = match self.skip_whitespace(p) {
                        Some(p) if *get_unchecked!(self.input, p) == b':' => p + 1,
                        Some(p) => return Err(RawError::new(p, ErrorCode::ExpectedColon)),
                        None => {
                            return Err(RawError::new(self.input.len(), ErrorCode::ExpectedColon))
                        }
                    };

                    p = match self.skip_whitespace(p) {
                        Some(p) => p,
                        None => return Err(self.unexpected_end()),
                    };
                }
            }

            let value_type = match *get_unchecked!(self.input, p) {
                b'n' => {
                    p = self.parse_null(p)?;
                    Kind::Null
                }
                b'f' => {
                    p = self.parse_false(p)?;
                    Kind::False
                }
                b't' => {
                    p = self.parse_true(p)?;
                    Kind::True
                }
                b'0'..=b'9' | b'-' => {
                    let (next, kind) = self.parse_number(p)?;
                    p = next;
                    kind
                }
                b'"' => {
                    self.reserve(2, p)?;

                    let (next, start, end) = self.parse_string(p)?;
                    p = next;

                    self.structure.emit(end);
                    self.structure.emit(start);

                    Kind::String
                }
                b @ (b'[' | b'{') => {
                    // push: the new frame's header records its parent
                    self.reserve(1, p)?;

                    let previous_base = current_base;
                    current_base = self.structure.write();
                    self.structure.push(ast::make_word(current_type, previous_base));

                    current_type = if b == b'[' { Kind::Array } else { Kind::Object };
                    had_comma = false;
                    fresh = true;
                    continue;
                }
                b @ (b']' | b'}') => {
                    let expected = if b == b']' { Kind::Array } else { Kind::Object };
                    if current_type != expected {
                        return Err(RawError::new(p, ErrorCode::ExpectedValue));
                    }
                    if had_comma {
                        // a trailing comma leaves this closer where a value belongs
                        return Err(RawError::new(p, ErrorCode::ExpectedValue));
                    }

                    p += 1;

                    let header = *get_unchecked!(self.structure.words(), current_base);

                    if current_type == Kind::Object {
                        self.install_object(current_base, header);
                    } else {
                        self.install_array(current_base, header);
                    }

                    if ast::word_payload(header) == ROOT_MARKER {
                        test_assert_eq!(self.structure.write(), self.structure.out());

                        return self.finish(p, current_type);
                    }

                    let closed = current_type;
                    current_type = Kind::from_word(header);
                    current_base = ast::word_payload(header);

                    closed
                }
                b',' => return Err(RawError::new(p, ErrorCode::UnexpectedComma)),
                _ => return Err(RawError::new(p, ErrorCode::ExpectedValue)),
            };

            // record the element in its frame; while it's pending, its
            // payload is its distance from the region's high end
            self.reserve(1, p)?;
            let pending = self.structure.capacity() - self.structure.out();
            self.structure.push(ast::make_word(value_type, pending));
            had_comma = false;
        }
    }

    /**
    Check that nothing but whitespace trails the root.
    */
    fn finish(&mut self, p: usize, root_type: Kind) -> Result<(Kind, usize), RawError> {
        match self.skip_whitespace(p) {
            None => Ok((root_type, self.structure.out())),
            Some(trailing) => Err(RawError::new(trailing, ErrorCode::ExpectedEndOfInput)),
        }
    }

    /**
    Copy a finished array frame into the arena.

    The root frame rewrites in place at the bottom of the region instead.
    */
    fn install_array(&mut self, frame: usize, header: usize) {
        let base = frame + 1;
        let length = self.structure.write() - base;

        let new_base = if ast::word_payload(header) == ROOT_MARKER {
            frame
        } else {
            self.structure.out() - length - 1
        };

        let cap = self.structure.capacity();
        let words = self.structure.words_mut();

        for k in (0..length).rev() {
            let word = *get_unchecked!(words, base + k);

            // rebase the pending end-relative payload onto the container
            let child = cap - ast::word_payload(word);
            *get_unchecked_mut!(words, new_base + 1 + k) =
                ast::make_word(Kind::from_word(word), child - new_base);
        }

        *get_unchecked_mut!(words, new_base) = length;

        self.structure.set_write(frame);
        self.structure.set_out(new_base);
    }

    /**
    Sort and copy a finished object frame into the arena.

    Entries are ordered by key so lookups can binary search; the comparison
    falls back to source position, so duplicate keys stay in document order.
    */
    fn install_object(&mut self, frame: usize, header: usize) {
        let base = frame + 1;
        let entry_words = self.structure.write() - base;
        test_assert_eq!(0, entry_words % ast::OBJECT_ENTRY_WORDS);
        let length = entry_words / ast::OBJECT_ENTRY_WORDS;

        {
            let input = &*self.input;
            let words = self.structure.words_mut();
            let entries = get_unchecked_mut!(words, base..base + entry_words);

            // SAFETY: an `ObjectKeyRecord` is exactly `OBJECT_ENTRY_WORDS`
            // words, laid out in declaration order and aligned like `usize`
            let records = unsafe {
                std::slice::from_raw_parts_mut(
                    entries.as_mut_ptr() as *mut ObjectKeyRecord,
                    length,
                )
            };

            records.sort_unstable_by(|lhs, rhs| lhs.compare(rhs, input));
        }

        let new_base = if ast::word_payload(header) == ROOT_MARKER {
            frame
        } else {
            self.structure.out() - entry_words - 1
        };

        let cap = self.structure.capacity();
        let words = self.structure.words_mut();

        for k in (0..length).rev() {
            let src = base + k * ast::OBJECT_ENTRY_WORDS;
            let dst = new_base + 1 + k * ast::OBJECT_ENTRY_WORDS;

            let key_start = *get_unchecked!(words, src);
            let key_end = *get_unchecked!(words, src + 1);
            let value = *get_unchecked!(words, src + 2);

            // key offsets are absolute buffer positions; only the value
            // word is rebased
            let child = cap - ast::word_payload(value);
            *get_unchecked_mut!(words, dst + 2) =
                ast::make_word(Kind::from_word(value), child - new_base);
            *get_unchecked_mut!(words, dst + 1) = key_end;
            *get_unchecked_mut!(words, dst) = key_start;
        }

        *get_unchecked_mut!(words, new_base) = length;

        self.structure.set_write(frame);
        self.structure.set_out(new_base);
    }

    fn parse_null(&self, p: usize) -> Result<usize, RawError> {
        if self.input.len() - p < 4 {
            return Err(self.unexpected_end());
        }

        if *get_unchecked!(self.input, p + 1..p + 4) != *b"ull" {
            return Err(RawError::new(p, ErrorCode::ExpectedNull));
        }

        Ok(p + 4)
    }

    fn parse_false(&self, p: usize) -> Result<usize, RawError> {
        if self.input.len() - p < 5 {
            return Err(self.unexpected_end());
        }

        if *get_unchecked!(self.input, p + 1..p + 5) != *b"alse" {
            return Err(RawError::new(p, ErrorCode::ExpectedFalse));
        }

        Ok(p + 5)
    }

    fn parse_true(&self, p: usize) -> Result<usize, RawError> {
        if self.input.len() - p < 4 {
            return Err(self.unexpected_end());
        }

        if *get_unchecked!(self.input, p + 1..p + 4) != *b"rue" {
            return Err(RawError::new(p, ErrorCode::ExpectedTrue));
        }

        Ok(p + 4)
    }

    #[inline]
    fn skip_whitespace(&self, mut p: usize) -> Option<usize> {
        while p < self.input.len() {
            if flags::is_whitespace(*get_unchecked!(self.input, p)) {
                p += 1;
            } else {
                return Some(p);
            }
        }

        None
    }

    #[inline]
    pub(super) fn reserve(&mut self, extra: usize, p: usize) -> Result<(), RawError> {
        self.structure
            .reserve(extra)
            .map_err(|_| RawError::new(p, ErrorCode::OutOfMemory))
    }

    #[cold]
    pub(super) fn unexpected_end(&self) -> RawError {
        RawError::new(self.input.len(), ErrorCode::UnexpectedEnd)
    }
}
