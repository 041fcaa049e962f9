//! Quota-bounded, canonical binary serialization.
//!
//! # Overview
//!
//! A binary serialization library designed to:
//! - Produce a compact, deterministic encoding: equal values marshal to
//!   byte-identical output, including associative containers, so the bytes
//!   can be hashed, signed, or compared directly
//! - Deserialize untrusted input under an explicit memory quota, so a
//!   hostile length prefix is rejected before it can trigger allocation
//!
//! # Supported Types
//!
//! Natively supports:
//! - Primitives: `u8`..`u128`, `i8`..`i128`, `f32`, `f64`, `bool`, `()`
//! - `String` and [`bytes::Bytes`] blobs
//! - Collections: `Vec<T>`, fixed arrays, `Option<T>`, tuples, `HashMap`,
//!   `BTreeMap`, `HashSet`, `BTreeSet` (maps and sets in canonical order)
//! - Recursive serialization of nested types via trait implementations
//!
//! User-defined types participate by implementing [`SizeHint`],
//! [`Marshal`], and [`Unmarshal`], by hand or with the derive macros in
//! `canonwire-macros`. An implementation on a concrete type always takes
//! precedence over generic handling: it is used wherever the type appears,
//! including inside built-in containers.
//!
//! # Example
//!
//! ```
//! use bytes::{Buf, BufMut};
//! use canonwire_codec::{Error, Marshal, Quota, SizeHint, Unmarshal};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Item {
//!     id: u64,
//!     tags: Vec<u32>,
//! }
//!
//! impl SizeHint for Item {
//!     fn size_hint(&self) -> usize {
//!         self.id.size_hint() + self.tags.size_hint()
//!     }
//! }
//!
//! impl Marshal for Item {
//!     fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
//!         self.id.marshal(buf, quota)?;
//!         self.tags.marshal(buf, quota)
//!     }
//! }
//!
//! impl Unmarshal for Item {
//!     fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error> {
//!         let id = u64::unmarshal(buf, quota)?;
//!         let tags = Vec::<u32>::unmarshal(buf, quota)?;
//!         Ok(Self { id, tags })
//!     }
//! }
//!
//! let item = Item { id: 7, tags: vec![1, 2, 3] };
//! let encoded = item.to_bytes().unwrap();
//! assert_eq!(encoded.len(), item.size_hint());
//! assert_eq!(Item::from_bytes(&encoded).unwrap(), item);
//! ```
//!
//! # Canonical Maps
//!
//! ```
//! use canonwire_codec::Marshal;
//! use std::collections::HashMap;
//!
//! let mut a = HashMap::new();
//! a.insert(1u32, 2u32);
//! a.insert(3, 4);
//!
//! let mut b = HashMap::new();
//! b.insert(3u32, 4u32);
//! b.insert(1, 2);
//!
//! // Same associations, different insertion order, identical bytes.
//! assert_eq!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
//! ```

pub mod codec;
pub mod error;
pub mod len;
pub mod quota;
pub mod types;
pub mod util;

// Re-export main types and traits
pub use codec::{Marshal, SizeHint, Unmarshal};
pub use error::Error;
pub use quota::{Quota, DEFAULT_QUOTA};
pub use types::vec::Prefixed;

// Needed so code generated by `canonwire-macros` can name third-party
// paths without requiring users to depend on them directly.
#[doc(hidden)]
pub use ::bytes;
