use std::fmt;

use crate::{
    alloc::AllocationStrategy,
    ast::Kind,
    buffer::Buffer,
    error::ParseError,
    parse::Value,
};

/**
A parsed JSON document.

A document owns the input buffer and the structure region built over it,
and reports either a valid root or the error parsing stopped at. The buffer
is kept either way, so error handling can still show the input.

Once parsed, nothing in a document is ever mutated again: it's safe to read
from any number of threads.
*/
pub struct Document<'input> {
    buffer: Buffer<'input>,
    inner: Inner,
}

enum Inner {
    Parsed {
        structure: Box<[usize]>,
        root_type: Kind,
        root: usize,
    },
    Failed(ParseError),
}

impl<'input> Document<'input> {
    /**
    Parse a buffer with the single up-front allocation strategy.
    */
    #[inline]
    pub fn parse_single(buffer: Buffer<'input>) -> Self {
        super::parse(AllocationStrategy::Single, buffer)
    }

    /**
    Parse a buffer, growing the structure region on demand.
    */
    #[inline]
    pub fn parse_dynamic(buffer: Buffer<'input>) -> Self {
        super::parse(AllocationStrategy::Dynamic, buffer)
    }

    #[inline]
    pub(crate) fn parsed(
        buffer: Buffer<'input>,
        structure: Box<[usize]>,
        root_type: Kind,
        root: usize,
    ) -> Self {
        Document {
            buffer,
            inner: Inner::Parsed {
                structure,
                root_type,
                root,
            },
        }
    }

    #[cold]
    pub(crate) fn failed(buffer: Buffer<'input>, error: ParseError) -> Self {
        Document {
            buffer,
            inner: Inner::Failed(error),
        }
    }

    /**
    Whether parsing produced a root value.
    */
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self.inner, Inner::Parsed { .. })
    }

    /**
    The root value, if the parse succeeded.
    */
    #[inline]
    pub fn root(&self) -> Option<Value<'_>> {
        match &self.inner {
            Inner::Parsed {
                structure,
                root_type,
                root,
            } => Some(Value::new(*root_type, structure, *root, self.buffer.bytes())),
            Inner::Failed(_) => None,
        }
    }

    /**
    The error, if the parse failed.
    */
    #[inline]
    pub fn error(&self) -> Option<&ParseError> {
        match &self.inner {
            Inner::Failed(error) => Some(error),
            Inner::Parsed { .. } => None,
        }
    }

    /**
    The document bytes, with any string escapes already decoded in place.
    */
    #[inline]
    pub fn input(&self) -> &[u8] {
        self.buffer.bytes()
    }

    pub(crate) fn structure(&self) -> Option<(&[usize], Kind, usize)> {
        match &self.inner {
            Inner::Parsed {
                structure,
                root_type,
                root,
            } => Some((structure, *root_type, *root)),
            Inner::Failed(_) => None,
        }
    }
}

impl<'input> fmt::Debug for Document<'input> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut debug = f.debug_struct("Document");

        debug.field("input", &String::from_utf8_lossy(self.buffer.bytes()));

        match &self.inner {
            Inner::Parsed {
                structure,
                root_type,
                ..
            } => {
                debug
                    .field("root_type", root_type)
                    .field("structure_words", &structure.len())
                    .field("root", &self.root());
            }
            Inner::Failed(error) => {
                debug.field("error", error);
            }
        }

        debug.finish()
    }
}

#[cfg(any(test, feature = "serde_json"))]
impl<'input> Document<'input> {
    /**
    Convert the document into a [`serde_json::Value`].

    An errored document converts to `Null`.
    */
    pub fn to_value(&self) -> serde_json::Value {
        impl<'doc> Value<'doc> {
            fn to_value(&self) -> serde_json::Value {
                match self.kind() {
                    Kind::Integer => serde_json::Value::from(self.integer_value()),
                    Kind::Double => serde_json::Number::from_f64(self.double_value())
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null),
                    Kind::Null => serde_json::Value::Null,
                    Kind::False => serde_json::Value::Bool(false),
                    Kind::True => serde_json::Value::Bool(true),
                    Kind::String => serde_json::Value::String(
                        String::from_utf8_lossy(self.string_bytes()).into_owned(),
                    ),
                    Kind::Array => {
                        serde_json::Value::Array(self.items().map(|item| item.to_value()).collect())
                    }
                    Kind::Object => {
                        let mut map = serde_json::Map::with_capacity(self.length());

                        for (key, value) in self.entries() {
                            map.insert(String::from_utf8_lossy(key).into_owned(), value.to_value());
                        }

                        serde_json::Value::Object(map)
                    }
                }
            }
        }

        match self.root() {
            Some(root) => root.to_value(),
            None => serde_json::Value::Null,
        }
    }
}
