//! Shared buffer checks.

use crate::Error;
use bytes::{Buf, BufMut};

/// Checks that `buf` has at least `len` readable bytes.
#[inline]
pub fn at_least(buf: &mut impl Buf, len: usize) -> Result<(), Error> {
    if buf.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    Ok(())
}

/// Checks that `buf` has at least `len` writable bytes.
#[inline]
pub fn writable(buf: &mut impl BufMut, len: usize) -> Result<(), Error> {
    if buf.remaining_mut() < len {
        return Err(Error::EndOfBuffer);
    }
    Ok(())
}
