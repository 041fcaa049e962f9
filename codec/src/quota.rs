//! Memory quota threaded through every marshal/unmarshal call.
//!
//! A [`Quota`] bounds both the bytes moved over the wire and the in-memory
//! allocation performed while decoding untrusted input. Every operation
//! charges its cost before doing the corresponding write, read, or
//! allocation, so a hostile length prefix is rejected in constant time
//! rather than after memory has been committed.
//!
//! # Examples
//!
//! ```
//! use canonwire_codec::{Marshal, Quota, Unmarshal};
//!
//! let mut quota = Quota::new(4);
//! let bytes = 300u32.to_bytes().unwrap();
//!
//! let mut buf = &bytes[..];
//! let decoded = u32::unmarshal(&mut buf, &mut quota).unwrap();
//! assert_eq!(decoded, 300);
//! assert_eq!(quota.remaining(), 0);
//! ```

use crate::Error;

/// Default quota, in bytes, used by [`crate::Marshal::to_bytes`] and
/// [`crate::Unmarshal::from_bytes`] (64 MiB).
///
/// This is an immutable process-wide constant; callers that need a
/// different budget pass an explicit [`Quota`] to the `*_with_quota`
/// variants.
pub const DEFAULT_QUOTA: usize = 64 * 1024 * 1024;

/// Remaining byte budget for the rest of an operation.
///
/// The budget only ever shrinks: a successful sub-operation decrements it
/// by exactly the sub-operation's logical cost, and a failed one leaves it
/// unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quota {
    remaining: usize,
}

impl Quota {
    /// Creates a quota with `limit` bytes of budget.
    pub const fn new(limit: usize) -> Self {
        Self { remaining: limit }
    }

    /// Returns the unconsumed budget.
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Checks that `cost` bytes of budget remain, without consuming them.
    ///
    /// Used for preflight lower bounds where the actual cost is charged by
    /// deeper calls.
    pub fn require(&self, cost: usize) -> Result<(), Error> {
        if cost > self.remaining {
            return Err(Error::QuotaExceeded);
        }
        Ok(())
    }

    /// Consumes `cost` bytes of budget.
    ///
    /// On failure the quota is left unchanged.
    pub fn charge(&mut self, cost: usize) -> Result<(), Error> {
        if cost > self.remaining {
            return Err(Error::QuotaExceeded);
        }
        self.remaining -= cost;
        Ok(())
    }
}

impl Default for Quota {
    fn default() -> Self {
        Self::new(DEFAULT_QUOTA)
    }
}
