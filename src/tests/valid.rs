use super::*;

use crate::{AllocationStrategy, Buffer, Kind};

#[test]
fn read_empty_array() {
    for input in [&b"[]"[..], b" [ ] ", b"\t[\r\n]"] {
        let doc = parse_valid(input);
        let root = doc.root().expect("no root");

        assert_eq!(Kind::Array, root.kind());
        assert_eq!(0, root.length());
    }
}

#[test]
fn read_empty_object() {
    for input in [&b"{}"[..], b" { } "] {
        let doc = parse_valid(input);
        let root = doc.root().expect("no root");

        assert_eq!(Kind::Object, root.kind());
        assert_eq!(0, root.length());
        assert_eq!(0, root.find_key(b"missing"));
    }
}

#[test]
fn read_nested_arrays() {
    let doc = parse_valid(b"[0,[0,[0],0],0]");
    let root = doc.root().expect("no root");

    assert_eq!(Kind::Array, root.kind());
    assert_eq!(3, root.length());

    for index in [0, 2] {
        let leaf = root.get(index);
        assert_eq!(Kind::Integer, leaf.kind());
        assert_eq!(0, leaf.integer_value());
    }

    let middle = root.get(1);
    assert_eq!(Kind::Array, middle.kind());
    assert_eq!(3, middle.length());

    let inner = middle.get(1);
    assert_eq!(Kind::Array, inner.kind());
    assert_eq!(1, inner.length());
    assert_eq!(0, inner.get(0).integer_value());
}

#[test]
fn read_atoms() {
    let doc = parse_valid(b"[null,true,false]");
    let root = doc.root().expect("no root");

    assert_eq!(Kind::Null, root.get(0).kind());
    assert_eq!(Kind::True, root.get(1).kind());
    assert_eq!(Kind::False, root.get(2).kind());
}

#[test]
fn read_integers() {
    let doc = parse_valid(b"[0,-1,2,2147483647,-2147483648]");
    let root = doc.root().expect("no root");

    let expected = [0, -1, 2, i32::MAX, i32::MIN];

    assert_eq!(expected.len(), root.length());

    for (index, expected) in expected.iter().enumerate() {
        let value = root.get(index);

        assert_eq!(Kind::Integer, value.kind());
        assert_eq!(*expected, value.integer_value());
        assert_eq!(*expected as f64, value.number_value());
    }
}

#[test]
fn read_wide_integers_as_doubles() {
    let doc = parse_valid(b"[2147483648,-2147483649,9007199254740992]");
    let root = doc.root().expect("no root");

    let expected = [2147483648.0, -2147483649.0, 9007199254740992.0];

    for (index, expected) in expected.iter().enumerate() {
        let value = root.get(index);

        assert_eq!(Kind::Double, value.kind());
        assert_eq!(*expected, value.double_value());
    }
}

#[test]
fn read_decimals() {
    let doc = parse_valid(b"[0.5,1.5,-0.25,100.125]");
    let root = doc.root().expect("no root");

    let expected = [0.5, 1.5, -0.25, 100.125];

    for (index, expected) in expected.iter().enumerate() {
        let value = root.get(index);

        assert_eq!(Kind::Double, value.kind());
        assert_eq!(*expected, value.double_value());
        assert_eq!(*expected, value.number_value());
    }
}

#[test]
fn read_scientific() {
    let doc = parse_valid(b"[2e+3,0.5E-5,10E+22]");
    let root = doc.root().expect("no root");

    // the values land exactly where the power-of-ten table puts them
    let expected = [2000.0, 5.0 * 1e-6, 10.0 * 1e22];

    for (index, expected) in expected.iter().enumerate() {
        let value = root.get(index);

        assert_eq!(Kind::Double, value.kind());
        assert_eq!(*expected, value.double_value());
    }
}

#[test]
fn read_extreme_exponents() {
    let doc = parse_valid(b"[1e309,1e-324,1e99999,1e-99999]");
    let root = doc.root().expect("no root");

    assert_eq!(f64::INFINITY, root.get(0).double_value());
    assert_eq!(0.0, root.get(1).double_value());
    assert_eq!(f64::INFINITY, root.get(2).double_value());
    assert_eq!(0.0, root.get(3).double_value());
}

#[test]
fn read_strings() {
    let doc = parse_valid(br#"["","a","hello, world","no escapes here at all"]"#);
    let root = doc.root().expect("no root");

    let expected: [&[u8]; 4] = [b"", b"a", b"hello, world", b"no escapes here at all"];

    for (index, expected) in expected.iter().enumerate() {
        let value = root.get(index);

        assert_eq!(Kind::String, value.kind());
        assert_eq!(*expected, value.string_bytes());
        assert_eq!(
            std::str::from_utf8(expected).unwrap(),
            value.as_str().expect("invalid utf8")
        );
    }
}

#[test]
fn read_escapes() {
    let doc = parse_valid(br#"["a\nb","\t","\"quoted\"","back\\slash","sla\/sh","\b\f\r"]"#);
    let root = doc.root().expect("no root");

    let expected: [&[u8]; 6] = [
        b"a\nb",
        b"\t",
        b"\"quoted\"",
        b"back\\slash",
        b"sla/sh",
        b"\x08\x0c\r",
    ];

    for (index, expected) in expected.iter().enumerate() {
        assert_eq!(*expected, root.get(index).string_bytes());
    }
}

#[test]
fn read_unicode_escapes() {
    let doc = parse_valid(br#"["\u0041","\u00e9","\u58c1","\uD83D\uDE00","\ud950\uDf21"]"#);
    let root = doc.root().expect("no root");

    assert_eq!("A", root.get(0).as_str().unwrap());
    assert_eq!("é", root.get(1).as_str().unwrap());
    assert_eq!("壁", root.get(2).as_str().unwrap());

    assert_eq!(&[0xF0, 0x9F, 0x98, 0x80][..], root.get(3).string_bytes());
    assert_eq!(&[0xF1, 0xA4, 0x8C, 0xA1][..], root.get(4).string_bytes());
}

#[test]
fn read_raw_utf8_passthrough() {
    let doc = parse_valid("[\"壁😄é\"]".as_bytes());
    let root = doc.root().expect("no root");

    assert_eq!("壁😄é", root.get(0).as_str().unwrap());
}

#[test]
fn fast_and_slow_string_paths_agree() {
    // `a` decodes to the same byte as a plain `a`, but forces the
    // in-place unescaper over the rest of the string
    let plain = parse_valid(br#"["abcdefghijklmnop"]"#);
    let escaped = parse_valid(br#"["\u0061bcdefghijklmnop"]"#);

    assert_eq!(
        plain.root().unwrap().get(0).string_bytes(),
        escaped.root().unwrap().get(0).string_bytes()
    );
}

#[test]
fn string_ranges_borrow_from_the_buffer() {
    let doc = parse_valid(br#"["plain","esc\naped"]"#);
    let root = doc.root().expect("no root");

    for index in 0..root.length() {
        let value = root.get(index);
        let range = value.string_range();

        assert_eq!(&doc.input()[range], value.string_bytes());
    }
}

#[test]
fn read_object_sorted() {
    let doc = parse_valid(br#"{"b":1,"a":0}"#);
    let root = doc.root().expect("no root");

    assert_eq!(Kind::Object, root.kind());
    assert_eq!(2, root.length());

    assert_eq!(b"a", root.key(0));
    assert_eq!(0, root.value(0).integer_value());

    assert_eq!(b"b", root.key(1));
    assert_eq!(1, root.value(1).integer_value());

    assert_eq!(0, root.find_key(b"a"));
    assert_eq!(1, root.find_key(b"b"));
    assert_eq!(2, root.find_key(b"c"));
}

#[test]
fn find_key_never_matches_a_prefix() {
    let doc = parse_valid(br#"{"prefix_key":0}"#);
    let root = doc.root().expect("no root");

    assert_eq!(1, root.find_key(b"prefix"));
    assert_eq!(1, root.find_key(b"prefix_key_longer"));
    assert_eq!(0, root.find_key(b"prefix_key"));
}

#[test]
fn find_key_orders_by_length_then_bytes() {
    let doc = parse_valid(br#"{"bb":1,"a":2,"ab":3,"b":4}"#);
    let root = doc.root().expect("no root");

    assert_eq!(b"a", root.key(0));
    assert_eq!(b"b", root.key(1));
    assert_eq!(b"ab", root.key(2));
    assert_eq!(b"bb", root.key(3));

    assert_eq!(2, root.value_of_key(b"a").unwrap().integer_value());
    assert_eq!(4, root.value_of_key(b"b").unwrap().integer_value());
    assert_eq!(3, root.value_of_key(b"ab").unwrap().integer_value());
    assert_eq!(1, root.value_of_key(b"bb").unwrap().integer_value());

    assert_eq!(4, root.find_key(b"ba"));
}

#[test]
fn duplicate_keys_resolve_to_the_first() {
    let doc = parse_valid(br#"{"a":1,"b":0,"a":2}"#);
    let root = doc.root().expect("no root");

    // duplicates are kept, sorted in document order
    assert_eq!(3, root.length());

    let index = root.find_key(b"a");
    assert_eq!(1, root.value(index).integer_value());
    assert_eq!(2, root.value(index + 1).integer_value());
}

#[test]
fn keys_decode_escapes() {
    let doc = parse_valid(br#"{"a\nb":1,"A":2}"#);
    let root = doc.root().expect("no root");

    assert_eq!(1, root.value_of_key(b"a\nb").unwrap().integer_value());
    assert_eq!(2, root.value_of_key(b"A").unwrap().integer_value());
}

#[test]
fn read_mixed_nesting() {
    let doc = parse_valid(br#"{"a":[{"b":null},true],"c":{"d":[1.5,"x"]}}"#);
    let root = doc.root().expect("no root");

    let a = root.value_of_key(b"a").expect("missing a");
    assert_eq!(Kind::Array, a.kind());
    assert_eq!(2, a.length());

    let b = a.get(0).value_of_key(b"b").expect("missing b");
    assert_eq!(Kind::Null, b.kind());
    assert_eq!(Kind::True, a.get(1).kind());

    let d = root
        .value_of_key(b"c")
        .expect("missing c")
        .value_of_key(b"d")
        .expect("missing d");
    assert_eq!(1.5, d.get(0).double_value());
    assert_eq!(b"x", d.get(1).string_bytes());
}

#[test]
fn read_whitespace_everywhere() {
    let doc = parse_valid(b" {\r\n\t\"a\" :\t[ 1 ,\n2 ] ,\"b\" : { } }\r\n");
    let root = doc.root().expect("no root");

    let a = root.value_of_key(b"a").expect("missing a");
    assert_eq!(1, a.get(0).integer_value());
    assert_eq!(2, a.get(1).integer_value());

    assert_eq!(0, root.value_of_key(b"b").expect("missing b").length());
}

#[test]
fn read_deep_nesting() {
    // the parser isn't recursive, so depth only costs structure words
    let depth = 1000;

    let mut input = Vec::new();
    input.extend(std::iter::repeat(b'[').take(depth));
    input.extend(std::iter::repeat(b']').take(depth));

    let doc = parse_valid(&input);
    let mut value = doc.root().expect("no root");

    for _ in 0..depth - 1 {
        assert_eq!(Kind::Array, value.kind());
        assert_eq!(1, value.length());

        value = value.get(0);
    }

    assert_eq!(Kind::Array, value.kind());
    assert_eq!(0, value.length());
}

#[test]
fn read_wide_document_grows_dynamic_region() {
    // enough elements to force a few doublings of the dynamic region
    let mut input = Vec::new();
    input.push(b'[');
    for i in 0..2000 {
        if i > 0 {
            input.push(b',');
        }

        input.extend(format!("{}", i).bytes());
    }
    input.push(b']');

    let doc = parse_valid(&input);
    let root = doc.root().expect("no root");

    assert_eq!(2000, root.length());

    for (index, value) in root.items().enumerate() {
        assert_eq!(index as i32, value.integer_value());
    }
}

#[test]
fn read_cases() {
    for input in [
        include_bytes!("../../cases/log_event.json") as &[u8],
        include_bytes!("../../cases/log_event_escaped.json") as &[u8],
    ] {
        let expected: serde_json::Value = serde_json::from_slice(input).unwrap();

        let doc = parse_valid(input);

        assert_value_eq(&expected, &doc.to_value());
    }
}

#[test]
fn read_generated() {
    // debug builds are slow, so just run a handful of cases
    let iterations = {
        #[cfg(debug)]
        {
            100
        }

        #[cfg(not(debug))]
        {
            2000
        }
    };

    for _ in 0..iterations {
        // Stampede the parser with valid combinations of JSON documents.
        // Fuzzing is good at finding bizarre almost-JSON but rarely
        // produces valid documents, so this generator covers the other
        // half.
        let input = some::json_document();

        let expected: serde_json::Value = match serde_json::from_str(&input) {
            Ok(expected) => expected,
            Err(e) => panic!("parsing `{}`: {}", input, e),
        };

        let doc = parse_valid(input.as_bytes());

        assert_value_eq(&expected, &doc.to_value());
    }
}

#[test]
fn parse_into_borrowed_region() {
    let mut region = br#"{"aA":1}"#.to_vec();

    let doc = Document::parse_single(Buffer::from_mut(&mut region));
    let root = doc.root().expect("no root");

    assert_eq!(1, root.value_of_key(b"aA").unwrap().integer_value());
}

#[test]
fn parse_with_explicit_strategy() {
    for strategy in [AllocationStrategy::Single, AllocationStrategy::Dynamic] {
        let doc = crate::parse(strategy, Buffer::from_str("[42]"));

        assert_eq!(
            42,
            doc.root().expect("no root").get(0).integer_value()
        );
    }
}

#[test]
fn documents_debug_without_panicking() {
    let doc = parse_valid(br#"{"a":[1,2.5,null,true,"x"]}"#);

    let _ = format!("{:?}", doc);
    let _ = format!("{:?}", doc.root().unwrap());
}

#[test]
fn kinds_display() {
    assert_eq!("<array>", Kind::Array.to_string());
    assert_eq!("<object>", Kind::Object.to_string());
    assert_eq!("<integer>", Kind::Integer.to_string());
    assert_eq!("<string>", Kind::String.to_string());
}
