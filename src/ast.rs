/*!
The tagged-word encoding for parsed values.

Every element of the structure region is one machine word. A tagged word
carries a [`Kind`] in its top three bits and a payload in the rest. For
composite children the payload is the offset in words from the parent
container's header to the child's header; leaves store their payloads
(integer bits, double bits, string byte ranges) directly in the words that
follow their header.
*/

use std::{cmp::Ordering, fmt, mem};

pub(crate) const KIND_BITS: usize = 3;
pub(crate) const KIND_SHIFT: usize = usize::BITS as usize - KIND_BITS;
pub(crate) const KIND_MASK: usize = (1 << KIND_BITS) - 1;
pub(crate) const PAYLOAD_MASK: usize = usize::MAX >> KIND_BITS;

/**
The payload of the outermost frame's header word during parsing.
*/
pub(crate) const ROOT_MARKER: usize = PAYLOAD_MASK;

/**
The number of words a double's payload occupies in the value arena.
*/
pub(crate) const DOUBLE_WORDS: usize = mem::size_of::<f64>() / mem::size_of::<usize>();

/**
The number of words an object entry occupies: a key's decoded byte range
and the entry's value word.
*/
pub(crate) const OBJECT_ENTRY_WORDS: usize = 3;

/**
The kind of a parsed JSON value.

The discriminants are a stable part of the AST format.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Kind {
    Integer = 0,
    Double = 1,
    Null = 2,
    False = 3,
    True = 4,
    String = 5,
    Array = 6,
    Object = 7,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::Integer => "<integer>".fmt(f),
            Kind::Double => "<double>".fmt(f),
            Kind::Null => "<null>".fmt(f),
            Kind::False => "<false>".fmt(f),
            Kind::True => "<true>".fmt(f),
            Kind::String => "<string>".fmt(f),
            Kind::Array => "<array>".fmt(f),
            Kind::Object => "<object>".fmt(f),
        }
    }
}

impl Kind {
    #[inline]
    pub(crate) fn from_word(word: usize) -> Self {
        match (word >> KIND_SHIFT) & KIND_MASK {
            0 => Kind::Integer,
            1 => Kind::Double,
            2 => Kind::Null,
            3 => Kind::False,
            4 => Kind::True,
            5 => Kind::String,
            6 => Kind::Array,
            _ => Kind::Object,
        }
    }
}

#[inline]
pub(crate) fn make_word(kind: Kind, payload: usize) -> usize {
    test_assert!(payload <= PAYLOAD_MASK);

    payload | ((kind as usize) << KIND_SHIFT)
}

#[inline]
pub(crate) fn word_payload(word: usize) -> usize {
    word & PAYLOAD_MASK
}

#[inline]
pub(crate) fn store_integer(value: i32) -> usize {
    value as u32 as usize
}

#[inline]
pub(crate) fn load_integer(word: usize) -> i32 {
    word as u32 as i32
}

#[cfg(target_pointer_width = "64")]
#[inline]
pub(crate) fn store_double(words: &mut [usize], value: f64) {
    words[0] = value.to_bits() as usize;
}

#[cfg(target_pointer_width = "64")]
#[inline]
pub(crate) fn load_double(words: &[usize]) -> f64 {
    f64::from_bits(words[0] as u64)
}

#[cfg(target_pointer_width = "32")]
#[inline]
pub(crate) fn store_double(words: &mut [usize], value: f64) {
    let bits = value.to_bits();

    words[0] = bits as u32 as usize;
    words[1] = (bits >> 32) as u32 as usize;
}

#[cfg(target_pointer_width = "32")]
#[inline]
pub(crate) fn load_double(words: &[usize]) -> f64 {
    f64::from_bits((words[0] as u64) | ((words[1] as u64) << 32))
}

/**
One object entry as laid out in a scratch frame and in the finished arena.

`key_start` and `key_end` are byte offsets of the decoded key in the
document buffer; `value` is the entry's tagged value word.
*/
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct ObjectKeyRecord {
    pub(crate) key_start: usize,
    pub(crate) key_end: usize,
    pub(crate) value: usize,
}

impl ObjectKeyRecord {
    #[inline]
    pub(crate) fn key<'input>(&self, input: &'input [u8]) -> &'input [u8] {
        get_unchecked!(input, self.key_start..self.key_end)
    }

    /**
    Order entries by key length, then key bytes, then source position so
    duplicate keys keep their document order.
    */
    #[inline]
    pub(crate) fn compare(&self, other: &Self, input: &[u8]) -> Ordering {
        let lhs = self.key(input);
        let rhs = other.key(input);

        lhs.len()
            .cmp(&rhs.len())
            .then_with(|| lhs.cmp(rhs))
            .then_with(|| self.key_start.cmp(&other.key_start))
    }
}
