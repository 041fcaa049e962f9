#![no_main]

use arbitrary::Arbitrary;
use canonwire_codec::{Marshal, Prefixed, Quota, SizeHint, Unmarshal};
use libfuzzer_sys::fuzz_target;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

fn roundtrip<T>(value: T)
where
    T: Marshal + Unmarshal + PartialEq + Debug,
{
    let encoded = value.to_bytes().expect("Failed to marshal value!");
    assert_eq!(
        encoded.len(),
        value.size_hint(),
        "size_hint disagrees with bytes produced"
    );
    let decoded = T::from_bytes(&encoded).expect("Failed to decode a successfully encoded input!");
    assert_eq!(value, decoded);
}

// NOTE: Separate float cases to handle NaN comparisons
fn roundtrip_f32(value: f32) {
    let encoded = value.to_bytes().expect("Failed to marshal f32!");
    let decoded = f32::from_bytes(&encoded).expect("Failed to decode f32!");
    if value.is_nan() && decoded.is_nan() {
        return;
    }
    assert_eq!(value, decoded);
}

fn roundtrip_f64(value: f64) {
    let encoded = value.to_bytes().expect("Failed to marshal f64!");
    let decoded = f64::from_bytes(&encoded).expect("Failed to decode f64!");
    if value.is_nan() && decoded.is_nan() {
        return;
    }
    assert_eq!(value, decoded);
}

fn roundtrip_map<K, V>(map: HashMap<K, V>)
where
    K: Marshal + Unmarshal + Clone + Eq + Hash + Debug,
    V: Marshal + Unmarshal + Clone + PartialEq + Debug,
{
    let encoded = map.to_bytes().expect("Failed to marshal map!");
    assert_eq!(encoded.len(), map.size_hint());

    // Re-inserting the entries in reverse iteration order must not change
    // a single byte of the canonical output.
    let entries: Vec<(K, V)> = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    let reversed: HashMap<K, V> = entries.into_iter().rev().collect();
    assert_eq!(encoded, reversed.to_bytes().expect("Failed to marshal map!"));

    let decoded = HashMap::<K, V>::from_bytes(&encoded).expect("Failed to decode map!");
    assert_eq!(map, decoded);
}

/// Unmarshal must terminate with a value or an error on any input; the
/// assertion here is simply "no panic", across destination types and
/// across quota sizes.
fn decode_any(data: &[u8], quota_limit: u16) {
    let _ = bool::from_bytes(data);
    let _ = u8::from_bytes(data);
    let _ = u16::from_bytes(data);
    let _ = u32::from_bytes(data);
    let _ = u64::from_bytes(data);
    let _ = u128::from_bytes(data);
    let _ = i32::from_bytes(data);
    let _ = i64::from_bytes(data);
    let _ = f32::from_bytes(data);
    let _ = f64::from_bytes(data);
    let _ = String::from_bytes(data);
    let _ = canonwire_codec::bytes::Bytes::from_bytes(data);
    let _ = <[u8; 16]>::from_bytes(data);
    let _ = <[u32; 4]>::from_bytes(data);
    let _ = Prefixed::<u8, 8>::from_bytes(data);
    let _ = Option::<u64>::from_bytes(data);
    let _ = <(u8, String, Vec<u16>)>::from_bytes(data);
    let _ = Vec::<u8>::from_bytes(data);
    let _ = Vec::<u64>::from_bytes(data);
    let _ = Vec::<String>::from_bytes(data);
    let _ = Vec::<Vec<u32>>::from_bytes(data);
    let _ = HashMap::<u64, u64>::from_bytes(data);
    let _ = HashMap::<String, Vec<u8>>::from_bytes(data);
    let _ = BTreeMap::<i32, bool>::from_bytes(data);
    let _ = HashSet::<u32>::from_bytes(data);
    let _ = BTreeSet::<String>::from_bytes(data);

    // Squeezed quotas must fail cleanly, never panic.
    let quota = Quota::new(quota_limit as usize);
    let _ = Vec::<u64>::from_bytes_with_quota(data, quota);
    let _ = HashMap::<String, u64>::from_bytes_with_quota(data, quota);
    let _ = String::from_bytes_with_quota(data, quota);
}

#[derive(Arbitrary, Debug)]
enum FuzzInput<'a> {
    // Arbitrary input decoded into every supported destination.
    Raw { data: &'a [u8], quota: u16 },

    // Primitives
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    F32(f32),
    F64(f64),

    // Byte-like
    Text(String),
    Blob(Vec<u8>),

    // Collections
    Vec(Vec<u64>),
    NestedVec(Vec<Vec<u8>>),
    ByteArray([u8; 32]),
    OptionSome(u32),
    OptionNone,
    Tuple(u8, u16, u32),
    Map(HashMap<u64, u64>),
    StringMap(HashMap<String, u32>),
    BTreeMapInput(BTreeMap<i32, u32>),
    Set(HashSet<u64>),
    BTreeSetInput(BTreeSet<u16>),
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Raw { data, quota } => decode_any(data, quota),
        FuzzInput::Bool(v) => roundtrip(v),
        FuzzInput::U8(v) => roundtrip(v),
        FuzzInput::U16(v) => roundtrip(v),
        FuzzInput::U32(v) => roundtrip(v),
        FuzzInput::U64(v) => roundtrip(v),
        FuzzInput::U128(v) => roundtrip(v),
        FuzzInput::I8(v) => roundtrip(v),
        FuzzInput::I16(v) => roundtrip(v),
        FuzzInput::I32(v) => roundtrip(v),
        FuzzInput::I64(v) => roundtrip(v),
        FuzzInput::I128(v) => roundtrip(v),
        FuzzInput::F32(v) => roundtrip_f32(v),
        FuzzInput::F64(v) => roundtrip_f64(v),
        FuzzInput::Text(v) => roundtrip(v),
        FuzzInput::Blob(v) => roundtrip(v),
        FuzzInput::Vec(v) => roundtrip(v),
        FuzzInput::NestedVec(v) => roundtrip(v),
        FuzzInput::ByteArray(v) => roundtrip(v),
        FuzzInput::OptionSome(v) => roundtrip(Some(v)),
        FuzzInput::OptionNone => roundtrip(None::<u32>),
        FuzzInput::Tuple(a, b, c) => roundtrip((a, b, c)),
        FuzzInput::Map(v) => roundtrip_map(v),
        FuzzInput::StringMap(v) => roundtrip_map(v),
        FuzzInput::BTreeMapInput(v) => roundtrip(v),
        FuzzInput::Set(v) => roundtrip(v),
        FuzzInput::BTreeSetInput(v) => roundtrip(v),
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
