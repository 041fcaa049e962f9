//! Canonical codec implementations for associative containers.
//!
//! Iteration order over a `HashMap` (or any other associative container)
//! is unspecified, so entries are emitted in a canonical order computed
//! from the entries themselves: every key is marshaled first, and the
//! marshaled byte strings are sorted shorter-first, then lexicographically.
//! That order is total and deterministic for any key type (it does not
//! depend on the key's native `Ord`, the hasher, or insertion history), so
//! two containers holding the same associations produce byte-identical
//! output, which is what downstream hashing and signing require.
//!
//! Keys are staged in a single scratch arena (one growing buffer with a
//! span per key) rather than one temporary buffer per key; the arena bytes
//! are what the quota is charged for, and they are later copied to the
//! output with a buffer check but no second charge.

use crate::{
    len::{marshal_len, unmarshal_len},
    util::writable,
    Error, Marshal, Quota, SizeHint, Unmarshal,
};
use bytes::{Buf, BufMut};
use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    hash::{BuildHasher, Hash},
    mem,
};

/// Total order over marshaled key bytes: shorter precedes longer, equal
/// lengths compare lexicographically.
fn canonical_cmp(a: &[u8], b: &[u8]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Marshals every key into a shared scratch arena, charging the quota for
/// each key's bytes, and returns the arena plus per-entry spans sorted in
/// canonical order.
fn canonical_entries<'a, K, V>(
    entries: impl Iterator<Item = (&'a K, &'a V)>,
    len: usize,
    quota: &mut Quota,
) -> Result<(Vec<u8>, Vec<(usize, usize, &'a V)>), Error>
where
    K: Marshal + 'a,
    V: 'a,
{
    let mut arena = Vec::new();
    let mut spans = Vec::with_capacity(len);
    for (key, value) in entries {
        let start = arena.len();
        key.marshal(&mut arena, quota)?;
        spans.push((start, arena.len(), value));
    }
    spans.sort_by(|a, b| canonical_cmp(&arena[a.0..a.1], &arena[b.0..b.1]));
    Ok((arena, spans))
}

/// Writes pre-marshaled key bytes followed by the value, in span order.
fn marshal_sorted<V: Marshal>(
    arena: &[u8],
    spans: &[(usize, usize, &V)],
    buf: &mut impl BufMut,
    quota: &mut Quota,
) -> Result<(), Error> {
    for &(start, end, value) in spans {
        // Key bytes were already charged while filling the arena.
        writable(buf, end - start)?;
        buf.put_slice(&arena[start..end]);
        value.marshal(buf, quota)?;
    }
    Ok(())
}

impl<K: SizeHint, V: SizeHint> SizeHint for BTreeMap<K, V> {
    fn size_hint(&self) -> usize {
        4 + self
            .iter()
            .map(|(k, v)| k.size_hint() + v.size_hint())
            .sum::<usize>()
    }
}

impl<K: Marshal, V: Marshal> Marshal for BTreeMap<K, V> {
    fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
        marshal_len(self.len(), buf, quota)?;
        let (arena, spans) = canonical_entries(self.iter(), self.len(), quota)?;
        marshal_sorted(&arena, &spans, buf, quota)
    }
}

impl<K: Unmarshal + Ord, V: Unmarshal> Unmarshal for BTreeMap<K, V> {
    fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error> {
        let estimate = (mem::size_of::<K>() + mem::size_of::<V>()).max(1);
        let count = unmarshal_len(estimate, buf, quota)?;
        quota.charge(count * estimate)?;
        let mut map = BTreeMap::new();
        for _ in 0..count {
            let key = K::unmarshal(buf, quota)?;
            let value = V::unmarshal(buf, quota)?;
            // Duplicate keys overwrite, per normal map semantics.
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<K: SizeHint, V: SizeHint, S> SizeHint for HashMap<K, V, S> {
    fn size_hint(&self) -> usize {
        4 + self
            .iter()
            .map(|(k, v)| k.size_hint() + v.size_hint())
            .sum::<usize>()
    }
}

impl<K: Marshal, V: Marshal, S> Marshal for HashMap<K, V, S> {
    fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
        marshal_len(self.len(), buf, quota)?;
        let (arena, spans) = canonical_entries(self.iter(), self.len(), quota)?;
        marshal_sorted(&arena, &spans, buf, quota)
    }
}

impl<K, V, S> Unmarshal for HashMap<K, V, S>
where
    K: Unmarshal + Eq + Hash,
    V: Unmarshal,
    S: BuildHasher + Default,
{
    fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error> {
        let estimate = (mem::size_of::<K>() + mem::size_of::<V>()).max(1);
        let count = unmarshal_len(estimate, buf, quota)?;
        quota.charge(count * estimate)?;
        let mut map = HashMap::with_capacity_and_hasher(count, S::default());
        for _ in 0..count {
            let key = K::unmarshal(buf, quota)?;
            let value = V::unmarshal(buf, quota)?;
            // Duplicate keys overwrite, per normal map semantics.
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<T: SizeHint, S> SizeHint for HashSet<T, S> {
    fn size_hint(&self) -> usize {
        4 + self.iter().map(SizeHint::size_hint).sum::<usize>()
    }
}

impl<T: Marshal, S> Marshal for HashSet<T, S> {
    fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
        marshal_len(self.len(), buf, quota)?;
        let (arena, spans) =
            canonical_entries(self.iter().map(|item| (item, item)), self.len(), quota)?;
        for &(start, end, _) in &spans {
            writable(buf, end - start)?;
            buf.put_slice(&arena[start..end]);
        }
        Ok(())
    }
}

impl<T, S> Unmarshal for HashSet<T, S>
where
    T: Unmarshal + Eq + Hash,
    S: BuildHasher + Default,
{
    fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error> {
        let estimate = mem::size_of::<T>().max(1);
        let count = unmarshal_len(estimate, buf, quota)?;
        quota.charge(count * estimate)?;
        let mut set = HashSet::with_capacity_and_hasher(count, S::default());
        for _ in 0..count {
            set.insert(T::unmarshal(buf, quota)?);
        }
        Ok(set)
    }
}

impl<T: SizeHint> SizeHint for BTreeSet<T> {
    fn size_hint(&self) -> usize {
        4 + self.iter().map(SizeHint::size_hint).sum::<usize>()
    }
}

impl<T: Marshal> Marshal for BTreeSet<T> {
    fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
        marshal_len(self.len(), buf, quota)?;
        let (arena, spans) =
            canonical_entries(self.iter().map(|item| (item, item)), self.len(), quota)?;
        for &(start, end, _) in &spans {
            writable(buf, end - start)?;
            buf.put_slice(&arena[start..end]);
        }
        Ok(())
    }
}

impl<T: Unmarshal + Ord> Unmarshal for BTreeSet<T> {
    fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error> {
        let estimate = mem::size_of::<T>().max(1);
        let count = unmarshal_len(estimate, buf, quota)?;
        quota.charge(count * estimate)?;
        let mut set = BTreeSet::new();
        for _ in 0..count {
            set.insert(T::unmarshal(buf, quota)?);
        }
        Ok(set)
    }
}
