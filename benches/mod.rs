#![cfg(unstable)]
#![feature(test)]
extern crate test;

use marmot_json::{Buffer, Document};

use std::str;

#[bench]
fn read_log_event_single(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.json");

    b.bytes = input.len() as u64;
    b.iter(|| Document::parse_single(Buffer::from_slice(input)))
}

#[bench]
fn read_log_event_dynamic(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.json");

    b.bytes = input.len() as u64;
    b.iter(|| Document::parse_dynamic(Buffer::from_slice(input)))
}

#[bench]
fn read_log_event_escaped_single(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event_escaped.json");

    b.bytes = input.len() as u64;
    b.iter(|| Document::parse_single(Buffer::from_slice(input)))
}

#[bench]
fn read_log_event_find_key(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.json");
    let doc = Document::parse_single(Buffer::from_slice(input));
    let root = doc.root().expect("failed to parse");

    b.iter(|| {
        let properties = root.value_of_key(b"Properties").expect("missing key");
        properties.value_of_key(b"Elapsed").expect("missing key").number_value()
    })
}

#[bench]
fn read_log_event_value_serde_json(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.json");

    b.bytes = input.len() as u64;
    b.iter(|| {
        let v: serde_json::Value = serde_json::from_slice(input).unwrap();
        v
    })
}

#[bench]
fn read_log_event_value_json(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.json");

    b.bytes = input.len() as u64;
    b.iter(|| json::parse(str::from_utf8(input).unwrap()).unwrap())
}
