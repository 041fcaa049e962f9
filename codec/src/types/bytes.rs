//! Codec implementations for byte-like types.
//!
//! Strings and byte blobs are length-prefixed and copied wholesale rather
//! than recursed element-by-element; their wire cost and allocation cost
//! coincide, so the payload is charged against the quota exactly once.

use crate::{
    len::{marshal_len, unmarshal_len},
    util::{at_least, writable},
    Error, Marshal, Quota, SizeHint, Unmarshal,
};
use bytes::{Buf, BufMut, Bytes};

impl SizeHint for String {
    #[inline]
    fn size_hint(&self) -> usize {
        4 + self.len()
    }
}

impl Marshal for String {
    #[inline]
    fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
        marshal_len(self.len(), buf, quota)?;
        writable(buf, self.len())?;
        quota.charge(self.len())?;
        buf.put_slice(self.as_bytes());
        Ok(())
    }
}

impl Unmarshal for String {
    #[inline]
    fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error> {
        let len = unmarshal_len(1, buf, quota)?;
        at_least(buf, len)?;
        quota.charge(len)?;
        let mut data = vec![0u8; len];
        buf.copy_to_slice(&mut data);
        String::from_utf8(data).map_err(|_| Error::InvalidUtf8)
    }
}

impl SizeHint for Bytes {
    #[inline]
    fn size_hint(&self) -> usize {
        4 + self.len()
    }
}

impl Marshal for Bytes {
    #[inline]
    fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
        marshal_len(self.len(), buf, quota)?;
        writable(buf, self.len())?;
        quota.charge(self.len())?;
        buf.put_slice(self);
        Ok(())
    }
}

impl Unmarshal for Bytes {
    #[inline]
    fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error> {
        let len = unmarshal_len(1, buf, quota)?;
        at_least(buf, len)?;
        quota.charge(len)?;
        Ok(buf.copy_to_bytes(len))
    }
}
