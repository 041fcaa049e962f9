//! Length-prefix encoding and the allocation preflight.
//!
//! Every variable-size aggregate is preceded by an unsigned 32-bit element
//! count. A count alone never bounds memory, so [`unmarshal_len`] scales it
//! by a conservative per-element cost and rejects the result against the
//! remaining quota before the caller allocates anything sized by it.

use crate::{Error, Marshal, Quota, Unmarshal};
use bytes::{Buf, BufMut};

/// Encodes `len` as the u32 length prefix.
///
/// Returns [`Error::LengthOverflow`] if `len` cannot be represented in 32
/// bits; lengths are never silently truncated.
pub fn marshal_len(len: usize, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
    let len = u32::try_from(len).map_err(|_| Error::LengthOverflow)?;
    len.marshal(buf, quota)
}

/// Decodes a u32 length prefix and bounds the allocation it implies.
///
/// `elem_size` is the minimum cost attributed to each declared element
/// (clamped to at least one byte, so zero-sized elements still count).
/// The scaled cost `count * max(elem_size, 1)` is computed in 64-bit
/// arithmetic; overflow fails with [`Error::LengthOverflow`] and a cost
/// beyond the remaining quota fails with [`Error::QuotaExceeded`]. Only
/// after both checks pass is `count` returned for the caller to allocate.
pub fn unmarshal_len(
    elem_size: usize,
    buf: &mut impl Buf,
    quota: &mut Quota,
) -> Result<usize, Error> {
    let count = u32::unmarshal(buf, quota)? as usize;
    let cost = (count as u64)
        .checked_mul(elem_size.max(1) as u64)
        .ok_or(Error::LengthOverflow)?;
    if cost > quota.remaining() as u64 {
        return Err(Error::QuotaExceeded);
    }
    Ok(count)
}
