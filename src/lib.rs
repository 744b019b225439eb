/*!
# `marmot-json`

## 🐹⚡

A single-pass, in-place JSON parser. The parser walks a mutable byte buffer
once and builds a compact, random-access AST beside it: one machine word per
element with the kind packed into the word's top bits, and string escapes
decoded by compacting bytes within the buffer itself. There is no tokenizer
and there are no per-node allocations; a parse costs one structure-region
allocation (or a handful of doublings under the dynamic strategy) plus
whatever the buffer itself cost.

## ⚠️ CAREFUL

The hot paths index buffers through unchecked macros, and object entries are
reinterpreted in place to sort and search them. Any changes need to be:

- tested against the differential and generated tests,
- fuzz tested under `MARMOTJSON_CHECKED=1`, which swaps every unchecked
  access for its checked equivalent.

## Use

```
use marmot_json::{Buffer, Document};

let doc = Document::parse_single(Buffer::from_str(r#"{"answer": 42}"#));

let root = doc.root().expect("failed to parse");
let answer = root.value_of_key(b"answer").expect("missing key");

assert_eq!(42, answer.integer_value());
```
*/

#![cfg_attr(checked, deny(warnings))]
#![allow(clippy::missing_safety_doc)] // false positives

#[macro_use]
mod macros;

pub(crate) mod std_ext;

mod alloc;
mod ast;
mod buffer;
mod error;
mod ffi;

pub mod parse;

pub use self::{
    alloc::AllocationStrategy,
    ast::Kind,
    buffer::Buffer,
    error::{ErrorCode, ParseError},
    parse::{parse, Document, Value},
};
