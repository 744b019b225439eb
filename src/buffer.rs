/*!
Mutable input buffers.

Parsing rewrites escape sequences in place, so the parser needs exclusive
mutable access to the document bytes for its lifetime. A [`Buffer`] either
owns a copy of the input or mutably borrows a caller's region, and moves
into the [`Document`](crate::Document) once parsing finishes.
*/

use std::fmt;

/**
A mutable view over the bytes of a JSON document.

Whatever the buffer wraps won't hold the original text once parsed: string
escapes are decoded by compacting bytes down within the buffer.
*/
pub struct Buffer<'input> {
    bytes: Bytes<'input>,
}

enum Bytes<'input> {
    Owned(Box<[u8]>),
    Borrowed(&'input mut [u8]),
    Empty,
}

impl Buffer<'static> {
    /**
    Copy a byte slice into an owned buffer.
    */
    pub fn from_slice(input: &[u8]) -> Self {
        Buffer {
            bytes: Bytes::Owned(input.into()),
        }
    }

    /**
    Copy a string into an owned buffer.
    */
    pub fn from_str(input: &str) -> Self {
        Buffer::from_slice(input.as_bytes())
    }

    /**
    Take ownership of a byte vector without copying it.
    */
    pub fn from_vec(input: Vec<u8>) -> Self {
        Buffer {
            bytes: Bytes::Owned(input.into_boxed_slice()),
        }
    }

    /**
    A buffer over no bytes.
    */
    pub fn empty() -> Self {
        Buffer {
            bytes: Bytes::Empty,
        }
    }
}

impl<'input> Buffer<'input> {
    /**
    Parse within a caller's mutable region, without copying it.

    The region must have no other readers for as long as the buffer (or the
    document it moves into) is alive.
    */
    pub fn from_mut(input: &'input mut [u8]) -> Self {
        Buffer {
            bytes: Bytes::Borrowed(input),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub(crate) fn bytes(&self) -> &[u8] {
        match &self.bytes {
            Bytes::Owned(bytes) => bytes,
            Bytes::Borrowed(bytes) => bytes,
            Bytes::Empty => &[],
        }
    }

    #[inline]
    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        match &mut self.bytes {
            Bytes::Owned(bytes) => bytes,
            Bytes::Borrowed(bytes) => bytes,
            Bytes::Empty => &mut [],
        }
    }
}

impl<'input> fmt::Debug for Buffer<'input> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("bytes", &String::from_utf8_lossy(self.bytes()))
            .finish()
    }
}
