use marmot_json::{Buffer, Document};

pub fn parse(input: &[u8]) {
    // Make sure no input panics, and that the strategies agree
    let single = Document::parse_single(Buffer::from_slice(input));
    let dynamic = Document::parse_dynamic(Buffer::from_slice(input));

    assert_eq!(single.is_valid(), dynamic.is_valid());
    assert_eq!(single.error(), dynamic.error());

    if single.is_valid() {
        assert_eq!(single.to_value(), dynamic.to_value());
    }

    // serde_json is the reference for validity: any object or array
    // document it accepts, we accept
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(input) {
        if value.is_object() || value.is_array() {
            assert!(
                single.is_valid(),
                "rejected a valid document: {:?}",
                single.error()
            );
        }
    }
}
