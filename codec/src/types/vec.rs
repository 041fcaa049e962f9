//! Codec implementations for length-prefixed sequences.
//!
//! Decoding a sequence charges the quota twice over: once for the
//! container allocation (the declared count scaled by the element's
//! in-memory size, bounded before the container exists) and once for the
//! wire bytes as each element decodes. Byte blobs take the cheaper
//! single-charge path in [`crate::types::bytes`].

use crate::{
    len::{marshal_len, unmarshal_len},
    Error, Marshal, Quota, SizeHint, Unmarshal,
};
use bytes::{Buf, BufMut};
use std::mem;

impl<T: SizeHint> SizeHint for Vec<T> {
    #[inline]
    fn size_hint(&self) -> usize {
        4 + self.iter().map(SizeHint::size_hint).sum::<usize>()
    }
}

impl<T: Marshal> Marshal for Vec<T> {
    #[inline]
    fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
        marshal_len(self.len(), buf, quota)?;
        for item in self {
            item.marshal(buf, quota)?;
        }
        Ok(())
    }
}

impl<T: Unmarshal> Unmarshal for Vec<T> {
    #[inline]
    fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error> {
        let count = unmarshal_len(mem::size_of::<T>(), buf, quota)?;
        // The estimate fits in the remaining quota (unmarshal_len verified
        // it), so this charge cannot overflow or fail.
        quota.charge(count * mem::size_of::<T>().max(1))?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::unmarshal(buf, quota)?);
        }
        Ok(items)
    }
}

/// A fixed-size array carried in the length-prefixed (sequence) framing.
///
/// A bare `[T; N]` is encoded without a prefix because its length is part
/// of the type. `Prefixed` exists for exchange with peers that frame the
/// same data as a variable-length sequence: it writes the count on the way
/// out and, on the way in, rejects any stream whose declared count differs
/// from `N` with [`Error::BadLength`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prefixed<T, const N: usize>(pub [T; N]);

impl<T, const N: usize> Prefixed<T, N> {
    /// Consumes the wrapper, returning the underlying array.
    pub fn into_inner(self) -> [T; N] {
        self.0
    }
}

impl<T, const N: usize> From<[T; N]> for Prefixed<T, N> {
    fn from(array: [T; N]) -> Self {
        Self(array)
    }
}

impl<T: SizeHint, const N: usize> SizeHint for Prefixed<T, N> {
    #[inline]
    fn size_hint(&self) -> usize {
        4 + self.0.size_hint()
    }
}

impl<T: Marshal, const N: usize> Marshal for Prefixed<T, N> {
    fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
        marshal_len(N, buf, quota)?;
        self.0.marshal(buf, quota)
    }
}

impl<T: Unmarshal, const N: usize> Unmarshal for Prefixed<T, N> {
    fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error> {
        let count = unmarshal_len(mem::size_of::<T>(), buf, quota)?;
        if count != N {
            return Err(Error::BadLength {
                expected: N,
                found: count,
            });
        }
        Ok(Self(<[T; N]>::unmarshal(buf, quota)?))
    }
}
