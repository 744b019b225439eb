use std::{cmp::Ordering, fmt, ops::Range, slice, str};

use crate::ast::{self, Kind, ObjectKeyRecord};

/**
A borrowed view of one value in a parsed document.

Values are cheap to copy and decode the structure region on demand. Kind
preconditions are asserted in test and checked builds: calling an accessor
for the wrong kind can't corrupt anything, but what it returns is
unspecified.
*/
#[derive(Clone, Copy)]
pub struct Value<'doc> {
    kind: Kind,
    payload: usize,
    structure: &'doc [usize],
    input: &'doc [u8],
}

impl<'doc> Value<'doc> {
    #[inline]
    pub(crate) fn new(
        kind: Kind,
        structure: &'doc [usize],
        payload: usize,
        input: &'doc [u8],
    ) -> Self {
        Value {
            kind,
            payload,
            structure,
            input,
        }
    }

    /**
    The kind of this value.
    */
    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /**
    The number of elements in an array, or entries in an object.
    */
    #[inline]
    pub fn length(&self) -> usize {
        test_assert!(matches!(self.kind, Kind::Array | Kind::Object));

        *get_unchecked!(self.structure, self.payload)
    }

    /**
    The array element at `index`.
    */
    #[inline]
    pub fn get(&self, index: usize) -> Value<'doc> {
        test_assert_eq!(Kind::Array, self.kind);
        test_assert!(index < self.length());

        self.child(*get_unchecked!(self.structure, self.payload + 1 + index))
    }

    /**
    The decoded bytes of the object key at `index`.

    Entries are sorted by key length, then key bytes.
    */
    #[inline]
    pub fn key(&self, index: usize) -> &'doc [u8] {
        test_assert_eq!(Kind::Object, self.kind);
        test_assert!(index < self.length());

        get_unchecked!(self.records(), index).key(self.input)
    }

    /**
    The object value at `index`.
    */
    #[inline]
    pub fn value(&self, index: usize) -> Value<'doc> {
        test_assert_eq!(Kind::Object, self.kind);
        test_assert!(index < self.length());

        self.child(get_unchecked!(self.records(), index).value)
    }

    /**
    Binary search an object for a key.

    Returns the entry's index, or `length()` when the key is absent. A
    prefix of a key never matches it. Duplicate keys resolve to their first
    occurrence in the document.
    */
    pub fn find_key(&self, name: &[u8]) -> usize {
        test_assert_eq!(Kind::Object, self.kind);

        let records = self.records();

        let index = records.partition_point(|record| {
            let key = record.key(self.input);

            match key.len().cmp(&name.len()) {
                Ordering::Less => true,
                Ordering::Greater => false,
                Ordering::Equal => key < name,
            }
        });

        match records.get(index) {
            Some(record) if record.key(self.input) == name => index,
            _ => records.len(),
        }
    }

    /**
    Look up the object value under `name`.
    */
    #[inline]
    pub fn value_of_key(&self, name: &[u8]) -> Option<Value<'doc>> {
        let index = self.find_key(name);

        if index < self.length() {
            Some(self.value(index))
        } else {
            None
        }
    }

    /**
    The value of an integer.
    */
    #[inline]
    pub fn integer_value(&self) -> i32 {
        test_assert_eq!(Kind::Integer, self.kind);

        ast::load_integer(*get_unchecked!(self.structure, self.payload))
    }

    /**
    The value of a double.
    */
    #[inline]
    pub fn double_value(&self) -> f64 {
        test_assert_eq!(Kind::Double, self.kind);

        ast::load_double(get_unchecked!(
            self.structure,
            self.payload..self.payload + ast::DOUBLE_WORDS
        ))
    }

    /**
    The value of an integer or double, widened to a double.
    */
    #[inline]
    pub fn number_value(&self) -> f64 {
        if self.kind == Kind::Integer {
            self.integer_value() as f64
        } else {
            self.double_value()
        }
    }

    /**
    The byte range a string's decoded bytes occupy in the document buffer.
    */
    #[inline]
    pub fn string_range(&self) -> Range<usize> {
        test_assert_eq!(Kind::String, self.kind);

        let start = *get_unchecked!(self.structure, self.payload);
        let end = *get_unchecked!(self.structure, self.payload + 1);

        start..end
    }

    /**
    The decoded bytes of a string, borrowed from the document buffer.
    */
    #[inline]
    pub fn string_bytes(&self) -> &'doc [u8] {
        get_unchecked!(self.input, self.string_range())
    }

    /**
    The decoded string, if it's valid UTF-8.

    Input bytes past ASCII aren't validated during parsing, so this check
    is the caller's opt-in.
    */
    #[inline]
    pub fn as_str(&self) -> Option<&'doc str> {
        str::from_utf8(self.string_bytes()).ok()
    }

    /**
    Iterate over the elements of an array.
    */
    pub fn items(&self) -> impl Iterator<Item = Value<'doc>> + 'doc {
        test_assert_eq!(Kind::Array, self.kind);

        let value = *self;

        (0..value.length()).map(move |index| value.get(index))
    }

    /**
    Iterate over the entries of an object in sorted key order.
    */
    pub fn entries(&self) -> impl Iterator<Item = (&'doc [u8], Value<'doc>)> + 'doc {
        test_assert_eq!(Kind::Object, self.kind);

        let value = *self;

        (0..value.length()).map(move |index| (value.key(index), value.value(index)))
    }

    #[inline]
    fn child(&self, word: usize) -> Value<'doc> {
        Value {
            kind: Kind::from_word(word),
            payload: self.payload + ast::word_payload(word),
            structure: self.structure,
            input: self.input,
        }
    }

    #[inline]
    fn records(&self) -> &'doc [ObjectKeyRecord] {
        let length = self.length();
        let entries = get_unchecked!(
            self.structure,
            self.payload + 1..self.payload + 1 + length * ast::OBJECT_ENTRY_WORDS
        );

        // SAFETY: an `ObjectKeyRecord` is exactly `OBJECT_ENTRY_WORDS`
        // words, laid out in declaration order and aligned like `usize`
        unsafe { slice::from_raw_parts(entries.as_ptr() as *const ObjectKeyRecord, length) }
    }
}

impl<'doc> fmt::Debug for Value<'doc> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            Kind::Integer => self.integer_value().fmt(f),
            Kind::Double => self.double_value().fmt(f),
            Kind::Null => f.write_str("null"),
            Kind::False => false.fmt(f),
            Kind::True => true.fmt(f),
            Kind::String => String::from_utf8_lossy(self.string_bytes()).fmt(f),
            Kind::Array => f.debug_list().entries(self.items()).finish(),
            Kind::Object => {
                let mut map = f.debug_map();

                for (key, value) in self.entries() {
                    map.entry(&String::from_utf8_lossy(key), &value);
                }

                map.finish()
            }
        }
    }
}
