//! Integration tests for derive macros.

use canonwire_codec::{Error, Marshal, Quota, SizeHint, Unmarshal};
use canonwire_macros::{Marshal, SizeHint, Unmarshal};

#[derive(Debug, Clone, PartialEq, SizeHint, Marshal, Unmarshal)]
struct SimpleStruct {
    a: u32,
    b: u64,
    c: bool,
}

#[derive(Debug, Clone, PartialEq, SizeHint, Marshal, Unmarshal)]
struct TupleStruct(u32, u64, bool);

#[derive(Debug, Clone, PartialEq, SizeHint, Marshal, Unmarshal)]
struct UnitStruct;

#[derive(Debug, Clone, PartialEq, SizeHint, Marshal, Unmarshal)]
struct NestedStruct {
    simple: SimpleStruct,
    value: u16,
}

#[derive(Debug, Clone, PartialEq, SizeHint, Marshal, Unmarshal)]
struct CollectionStruct {
    name: String,
    scores: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, SizeHint, Marshal, Unmarshal)]
struct SkipStruct {
    id: u32,
    #[canonwire(skip)]
    cached: Option<u64>,
    flag: bool,
}

#[derive(Debug, Clone, PartialEq, SizeHint, Marshal, Unmarshal)]
struct GenericStruct<T> {
    inner: T,
    count: u8,
}

#[derive(Debug, Clone, PartialEq, SizeHint, Marshal, Unmarshal)]
enum SimpleEnum {
    Unit,
    Tuple(u32),
    Struct { field: u16 },
}

#[derive(Debug, Clone, PartialEq, SizeHint, Marshal, Unmarshal)]
enum ComplexEnum {
    Empty,
    Single(bool),
    Double(u16, u32),
    Named { id: u8, count: u64 },
}

#[derive(Debug, Clone, PartialEq, SizeHint, Marshal, Unmarshal)]
enum NestedEnum {
    Simple(SimpleEnum),
    WithStruct { point: SimpleStruct, tag: u8 },
}

#[test]
fn test_simple_struct_derive() {
    let original = SimpleStruct {
        a: 42,
        b: 1337,
        c: true,
    };

    let expected_size = 4 + 8 + 1;
    assert_eq!(original.size_hint(), expected_size);

    let encoded = original.to_bytes().unwrap();
    assert_eq!(encoded.len(), expected_size);

    let decoded = SimpleStruct::from_bytes(&encoded).unwrap();
    assert_eq!(original, decoded);
}

#[test]
fn test_declaration_order_on_wire() {
    let original = SimpleStruct {
        a: 0x01020304,
        b: 0x05060708090A0B0C,
        c: true,
    };
    let encoded = original.to_bytes().unwrap();
    assert_eq!(
        encoded,
        &[
            0x01, 0x02, 0x03, 0x04, // a
            0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, // b
            0x01, // c
        ][..]
    );
}

#[test]
fn test_tuple_struct_derive() {
    let original = TupleStruct(42, 1337, true);
    let encoded = original.to_bytes().unwrap();
    assert_eq!(encoded.len(), original.size_hint());
    let decoded = TupleStruct::from_bytes(&encoded).unwrap();
    assert_eq!(original, decoded);
}

#[test]
fn test_unit_struct_derive() {
    let original = UnitStruct;
    let encoded = original.to_bytes().unwrap();
    assert!(encoded.is_empty());
    let decoded = UnitStruct::from_bytes(&encoded).unwrap();
    assert_eq!(original, decoded);
}

#[test]
fn test_nested_struct_derive() {
    let original = NestedStruct {
        simple: SimpleStruct {
            a: 1,
            b: 2,
            c: false,
        },
        value: 3,
    };
    let encoded = original.to_bytes().unwrap();
    assert_eq!(encoded.len(), original.size_hint());
    let decoded = NestedStruct::from_bytes(&encoded).unwrap();
    assert_eq!(original, decoded);
}

#[test]
fn test_collection_struct_derive() {
    let original = CollectionStruct {
        name: String::from("canon"),
        scores: vec![10, 20, 30],
    };
    let encoded = original.to_bytes().unwrap();
    assert_eq!(encoded.len(), original.size_hint());
    let decoded = CollectionStruct::from_bytes(&encoded).unwrap();
    assert_eq!(original, decoded);
}

#[test]
fn test_skip_field() {
    let original = SkipStruct {
        id: 9,
        cached: Some(0xFFFF),
        flag: true,
    };

    // The skipped field contributes nothing to the schema.
    assert_eq!(original.size_hint(), 4 + 1);
    let encoded = original.to_bytes().unwrap();
    assert_eq!(encoded, &[0x00, 0x00, 0x00, 0x09, 0x01][..]);

    // Decoding rebuilds it with Default.
    let decoded = SkipStruct::from_bytes(&encoded).unwrap();
    assert_eq!(decoded.id, 9);
    assert_eq!(decoded.cached, None);
    assert!(decoded.flag);
}

#[test]
fn test_generic_struct_derive() {
    let original = GenericStruct {
        inner: vec![1u64, 2],
        count: 2,
    };
    let encoded = original.to_bytes().unwrap();
    assert_eq!(encoded.len(), original.size_hint());
    let decoded = GenericStruct::<Vec<u64>>::from_bytes(&encoded).unwrap();
    assert_eq!(original, decoded);
}

#[test]
fn test_simple_enum_derive() {
    let values = [
        SimpleEnum::Unit,
        SimpleEnum::Tuple(500),
        SimpleEnum::Struct { field: 7 },
    ];
    for original in values {
        let encoded = original.to_bytes().unwrap();
        assert_eq!(encoded.len(), original.size_hint());
        let decoded = SimpleEnum::from_bytes(&encoded).unwrap();
        assert_eq!(original, decoded);
    }
}

#[test]
fn test_enum_variant_tag() {
    assert_eq!(SimpleEnum::Unit.to_bytes().unwrap(), &[0x00][..]);
    assert_eq!(
        SimpleEnum::Tuple(1).to_bytes().unwrap(),
        &[0x01, 0x00, 0x00, 0x00, 0x01][..]
    );
    assert_eq!(
        SimpleEnum::Struct { field: 2 }.to_bytes().unwrap(),
        &[0x02, 0x00, 0x02][..]
    );
}

#[test]
fn test_enum_unknown_variant() {
    assert!(matches!(
        SimpleEnum::from_bytes(&[0x03]),
        Err(Error::InvalidVariant(0x03))
    ));
}

#[test]
fn test_complex_enum_derive() {
    let values = [
        ComplexEnum::Empty,
        ComplexEnum::Single(true),
        ComplexEnum::Double(1, 2),
        ComplexEnum::Named { id: 3, count: 4 },
    ];
    for original in values {
        let encoded = original.to_bytes().unwrap();
        assert_eq!(encoded.len(), original.size_hint());
        let decoded = ComplexEnum::from_bytes(&encoded).unwrap();
        assert_eq!(original, decoded);
    }
}

#[test]
fn test_nested_enum_derive() {
    let values = [
        NestedEnum::Simple(SimpleEnum::Tuple(11)),
        NestedEnum::WithStruct {
            point: SimpleStruct {
                a: 1,
                b: 2,
                c: true,
            },
            tag: 5,
        },
    ];
    for original in values {
        let encoded = original.to_bytes().unwrap();
        assert_eq!(encoded.len(), original.size_hint());
        let decoded = NestedEnum::from_bytes(&encoded).unwrap();
        assert_eq!(original, decoded);
    }
}

#[test]
fn test_derived_quota_propagation() {
    let original = SimpleStruct {
        a: 1,
        b: 2,
        c: false,
    };
    // Thirteen bytes are needed; a twelve-byte quota fails on the last
    // field and charges nothing for it.
    let mut quota = Quota::new(12);
    let mut data = [0u8; 13];
    let mut buf = &mut data[..];
    assert!(matches!(
        original.marshal(&mut buf, &mut quota),
        Err(Error::QuotaExceeded)
    ));
    assert_eq!(quota.remaining(), 0);

    let encoded = original.to_bytes().unwrap();
    let mut quota = Quota::new(13);
    let mut buf = &encoded[..];
    let decoded = SimpleStruct::unmarshal(&mut buf, &mut quota).unwrap();
    assert_eq!(original, decoded);
    assert_eq!(quota.remaining(), 0);
}

#[test]
fn test_derived_truncated_input() {
    let encoded = SimpleStruct {
        a: 1,
        b: 2,
        c: true,
    }
    .to_bytes()
    .unwrap();
    assert!(matches!(
        SimpleStruct::from_bytes(&encoded[..6]),
        Err(Error::EndOfBuffer)
    ));
}
