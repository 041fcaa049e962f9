//! Core codec traits.
//!
//! The three traits below are the only entry points: [`SizeHint`] estimates
//! a value's encoded length, [`Marshal`] writes a value, and [`Unmarshal`]
//! reconstructs one. Built-in implementations cover the primitive and
//! container kinds in [`crate::types`]; a user type takes over its own
//! format simply by implementing the traits (directly, or with the derives
//! from `canonwire-macros`), and coherence guarantees that such an
//! implementation is the one used everywhere the type appears, including
//! as an element, field, key, or value inside a built-in container.
//!
//! Every operation threads a buffer cursor and a [`Quota`]. Both only ever
//! advance: a successful call consumes exactly the bytes and budget it
//! logically needed, and a failed call returns with the cost of the failing
//! step uncommitted. Callers must discard any partially written output on
//! error.

use crate::{Error, Quota};
use bytes::{Buf, BufMut};

/// Trait for types that can estimate their encoded length.
pub trait SizeHint {
    /// Returns the number of bytes the value occupies once marshaled.
    ///
    /// For every built-in implementation this is exact, and [`Marshal`]
    /// implementations are expected to keep it that way: `to_bytes` sizes
    /// its output buffer from this value.
    fn size_hint(&self) -> usize;
}

/// Trait for types that can be written to a buffer under a quota.
pub trait Marshal: SizeHint {
    /// Encodes this value into `buf`, charging `quota` for every byte
    /// written.
    ///
    /// Returns [`Error::EndOfBuffer`] if `buf` cannot hold the encoding and
    /// [`Error::QuotaExceeded`] if the budget runs out; in both cases the
    /// failing step leaves buffer and quota untouched.
    fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error>;

    /// Encodes this value into a fresh byte vector using [`DEFAULT_QUOTA`].
    ///
    /// [`DEFAULT_QUOTA`]: crate::DEFAULT_QUOTA
    ///
    /// (Provided method).
    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        self.to_bytes_with_quota(Quota::default())
    }

    /// Encodes this value into a fresh byte vector bounded by `quota`.
    ///
    /// The output buffer is sized from [`SizeHint::size_hint`], and that
    /// allocation itself must fit within the quota.
    ///
    /// (Provided method).
    fn to_bytes_with_quota(&self, mut quota: Quota) -> Result<Vec<u8>, Error> {
        let hint = self.size_hint();
        quota.require(hint)?;
        let mut data = vec![0u8; hint];
        let mut buf = &mut data[..];
        self.marshal(&mut buf, &mut quota)?;
        let written = hint - buf.len();
        data.truncate(written);
        Ok(data)
    }
}

/// Trait for types that can be decoded from a buffer under a quota.
///
/// Decoding never trusts a declared length: any count that would allocate
/// more than the remaining quota is rejected before the allocation occurs,
/// so arbitrary input always terminates with a value or an error.
pub trait Unmarshal: Sized {
    /// Decodes a value from `buf`, charging `quota` for every byte read and
    /// for the allocation cost of any container built along the way.
    fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error>;

    /// Decodes a value from the front of `data` using [`DEFAULT_QUOTA`].
    ///
    /// Trailing bytes after the decoded value are ignored.
    ///
    /// [`DEFAULT_QUOTA`]: crate::DEFAULT_QUOTA
    ///
    /// (Provided method).
    fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        Self::from_bytes_with_quota(data, Quota::default())
    }

    /// Decodes a value from the front of `data` bounded by `quota`.
    ///
    /// (Provided method).
    fn from_bytes_with_quota(data: &[u8], mut quota: Quota) -> Result<Self, Error> {
        let mut buf = data;
        Self::unmarshal(&mut buf, &mut quota)
    }
}
