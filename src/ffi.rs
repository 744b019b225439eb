/*!
C bindings over opaque document handles.

The cdylib exports a flat API mirroring the library surface: parse a byte
region into a handle, interrogate it, free it. A handle owns a copy of the
input bytes, so the caller's region can be released as soon as the parse
call returns. None of these functions check for null handles; passing one
is the caller's bug.
*/

use std::{
    ffi::CString,
    os::raw::{c_char, c_int},
    ptr, slice,
};

use crate::{parse, AllocationStrategy, Buffer, Document, Kind};

unsafe fn parse_raw(
    strategy: AllocationStrategy,
    bytes: *const u8,
    length: usize,
) -> *mut Document<'static> {
    let buffer = if bytes.is_null() {
        Buffer::empty()
    } else {
        Buffer::from_slice(slice::from_raw_parts(bytes, length))
    };

    Box::into_raw(Box::new(parse(strategy, buffer)))
}

/**
Parse a byte region with the single up-front allocation strategy.

The bytes are copied. The returned handle must be released with
[`marmot_json_free`].
*/
#[no_mangle]
pub unsafe extern "C" fn marmot_json_parse_single(
    bytes: *const u8,
    length: usize,
) -> *mut Document<'static> {
    parse_raw(AllocationStrategy::Single, bytes, length)
}

/**
Parse a byte region, growing the structure region on demand.
*/
#[no_mangle]
pub unsafe extern "C" fn marmot_json_parse_dynamic(
    bytes: *const u8,
    length: usize,
) -> *mut Document<'static> {
    parse_raw(AllocationStrategy::Dynamic, bytes, length)
}

/**
Release a document handle.
*/
#[no_mangle]
pub unsafe extern "C" fn marmot_json_free(doc: *mut Document<'static>) {
    if !doc.is_null() {
        drop(Box::from_raw(doc));
    }
}

#[no_mangle]
pub unsafe extern "C" fn marmot_json_has_error(doc: *const Document<'static>) -> c_int {
    (!(*doc).is_valid()) as c_int
}

/**
The 1-based line a failed parse stopped at, or `0` for a valid document.
*/
#[no_mangle]
pub unsafe extern "C" fn marmot_json_error_line(doc: *const Document<'static>) -> usize {
    (*doc).error().map(|error| error.line()).unwrap_or(0)
}

/**
The 1-based column a failed parse stopped at, or `0` for a valid document.
*/
#[no_mangle]
pub unsafe extern "C" fn marmot_json_error_column(doc: *const Document<'static>) -> usize {
    (*doc).error().map(|error| error.column()).unwrap_or(0)
}

/**
The error rendered as a NUL-terminated string, or null for a valid
document. Release it with [`marmot_json_free_error_message`].
*/
#[no_mangle]
pub unsafe extern "C" fn marmot_json_error_message(doc: *const Document<'static>) -> *mut c_char {
    match (*doc).error() {
        Some(error) => CString::new(error.to_string())
            .map(CString::into_raw)
            .unwrap_or(ptr::null_mut()),
        None => ptr::null_mut(),
    }
}

/**
Release a string returned by [`marmot_json_error_message`].
*/
#[no_mangle]
pub unsafe extern "C" fn marmot_json_free_error_message(message: *mut c_char) {
    if !message.is_null() {
        drop(CString::from_raw(message));
    }
}

/**
The root's kind as its stable discriminant; `null`'s for an errored
document.
*/
#[no_mangle]
pub unsafe extern "C" fn marmot_json_root_type(doc: *const Document<'static>) -> u8 {
    match (*doc).structure() {
        Some((_, root_type, _)) => root_type as u8,
        None => Kind::Null as u8,
    }
}

/**
A pointer to the root's payload words, or null for an errored document.
*/
#[no_mangle]
pub unsafe extern "C" fn marmot_json_root_payload(doc: *const Document<'static>) -> *const usize {
    match (*doc).structure() {
        Some((structure, _, root)) => structure.as_ptr().add(root),
        None => ptr::null(),
    }
}

/**
The document bytes, with string escapes decoded in place.
*/
#[no_mangle]
pub unsafe extern "C" fn marmot_json_input_bytes(doc: *const Document<'static>) -> *const u8 {
    (*doc).input().as_ptr()
}

#[no_mangle]
pub unsafe extern "C" fn marmot_json_input_length(doc: *const Document<'static>) -> usize {
    (*doc).input().len()
}
