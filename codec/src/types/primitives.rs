//! Codec implementations for Rust primitive types.
//!
//! All multi-byte integers are written big-endian, and floats are written
//! as the big-endian bytes of their IEEE-754 bit pattern, so the wire
//! format never depends on host endianness. Every scalar checks both the
//! buffer and the quota before moving a single byte; a failed scalar
//! operation leaves both untouched.
//!
//! Fixed-size arrays carry no length prefix (their length is part of the
//! type); see [`crate::types::vec::Prefixed`] for the length-prefixed
//! framing of a fixed array.

use crate::{
    util::{at_least, writable},
    Error, Marshal, Quota, SizeHint, Unmarshal,
};
use bytes::{Buf, BufMut};

// Numeric types implementation
macro_rules! impl_numeric {
    ($type:ty, $get_method:ident, $put_method:ident) => {
        impl SizeHint for $type {
            #[inline]
            fn size_hint(&self) -> usize {
                std::mem::size_of::<$type>()
            }
        }

        impl Marshal for $type {
            #[inline]
            fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
                writable(buf, std::mem::size_of::<$type>())?;
                quota.charge(std::mem::size_of::<$type>())?;
                buf.$put_method(*self);
                Ok(())
            }
        }

        impl Unmarshal for $type {
            #[inline]
            fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error> {
                at_least(buf, std::mem::size_of::<$type>())?;
                quota.charge(std::mem::size_of::<$type>())?;
                Ok(buf.$get_method())
            }
        }
    };
}

impl_numeric!(u8, get_u8, put_u8);
impl_numeric!(u16, get_u16, put_u16);
impl_numeric!(u32, get_u32, put_u32);
impl_numeric!(u64, get_u64, put_u64);
impl_numeric!(u128, get_u128, put_u128);
impl_numeric!(i8, get_i8, put_i8);
impl_numeric!(i16, get_i16, put_i16);
impl_numeric!(i32, get_i32, put_i32);
impl_numeric!(i64, get_i64, put_i64);
impl_numeric!(i128, get_i128, put_i128);
impl_numeric!(f32, get_f32, put_f32);
impl_numeric!(f64, get_f64, put_f64);

// Bool implementation
impl SizeHint for bool {
    #[inline]
    fn size_hint(&self) -> usize {
        1
    }
}

impl Marshal for bool {
    #[inline]
    fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
        let byte: u8 = if *self { 1 } else { 0 };
        byte.marshal(buf, quota)
    }
}

impl Unmarshal for bool {
    #[inline]
    fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error> {
        match u8::unmarshal(buf, quota)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::InvalidBool),
        }
    }
}

// Unit implementation
impl SizeHint for () {
    #[inline]
    fn size_hint(&self) -> usize {
        0
    }
}

impl Marshal for () {
    #[inline]
    fn marshal(&self, _: &mut impl BufMut, _: &mut Quota) -> Result<(), Error> {
        Ok(())
    }
}

impl Unmarshal for () {
    #[inline]
    fn unmarshal(_: &mut impl Buf, _: &mut Quota) -> Result<Self, Error> {
        Ok(())
    }
}

// Constant-size array implementation
impl<T: SizeHint, const N: usize> SizeHint for [T; N] {
    #[inline]
    fn size_hint(&self) -> usize {
        self.iter().map(SizeHint::size_hint).sum()
    }
}

impl<T: Marshal, const N: usize> Marshal for [T; N] {
    fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
        // Lower-bound preflight at one byte per element; each element still
        // performs its own exact checks.
        writable(buf, N)?;
        quota.require(N)?;
        for item in self {
            item.marshal(buf, quota)?;
        }
        Ok(())
    }
}

impl<T: Unmarshal, const N: usize> Unmarshal for [T; N] {
    fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error> {
        at_least(buf, N)?;
        quota.require(N)?;
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::unmarshal(buf, quota)?);
        }
        match items.try_into() {
            Ok(array) => Ok(array),
            // Exactly N elements were pushed.
            Err(_) => unreachable!(),
        }
    }
}

// Option implementation
impl<T: SizeHint> SizeHint for Option<T> {
    #[inline]
    fn size_hint(&self) -> usize {
        match self {
            Some(inner) => 1 + inner.size_hint(),
            None => 1,
        }
    }
}

impl<T: Marshal> Marshal for Option<T> {
    #[inline]
    fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
        self.is_some().marshal(buf, quota)?;
        if let Some(inner) = self {
            inner.marshal(buf, quota)?;
        }
        Ok(())
    }
}

impl<T: Unmarshal> Unmarshal for Option<T> {
    #[inline]
    fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error> {
        if bool::unmarshal(buf, quota)? {
            Ok(Some(T::unmarshal(buf, quota)?))
        } else {
            Ok(None)
        }
    }
}

// References and boxes are transparent: the encoding is the pointee's.
impl<T: SizeHint + ?Sized> SizeHint for &T {
    #[inline]
    fn size_hint(&self) -> usize {
        (**self).size_hint()
    }
}

impl<T: Marshal + ?Sized> Marshal for &T {
    #[inline]
    fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
        (**self).marshal(buf, quota)
    }
}

impl<T: SizeHint + ?Sized> SizeHint for Box<T> {
    #[inline]
    fn size_hint(&self) -> usize {
        (**self).size_hint()
    }
}

impl<T: Marshal + ?Sized> Marshal for Box<T> {
    #[inline]
    fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
        (**self).marshal(buf, quota)
    }
}

impl<T: Unmarshal> Unmarshal for Box<T> {
    #[inline]
    fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error> {
        Ok(Box::new(T::unmarshal(buf, quota)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paste::paste;

    macro_rules! impl_num_test {
        ($type:ty) => {
            paste! {
                #[test]
                fn [<test_ $type>]() {
                    let expected_len = std::mem::size_of::<$type>();
                    let values: [$type; 5] =
                        [0 as $type, 1 as $type, 42 as $type, <$type>::MAX, <$type>::MIN];
                    for value in values.iter() {
                        let encoded = value.to_bytes().unwrap();
                        assert_eq!(encoded.len(), expected_len);
                        assert_eq!(value.size_hint(), expected_len);
                        let decoded = <$type>::from_bytes(&encoded).unwrap();
                        assert_eq!(*value, decoded);
                    }
                }
            }
        };
    }
    impl_num_test!(u8);
    impl_num_test!(u16);
    impl_num_test!(u32);
    impl_num_test!(u64);
    impl_num_test!(u128);
    impl_num_test!(i8);
    impl_num_test!(i16);
    impl_num_test!(i32);
    impl_num_test!(i64);
    impl_num_test!(i128);
    impl_num_test!(f32);
    impl_num_test!(f64);

    #[test]
    fn test_conformity() {
        // Bool
        assert_eq!(true.to_bytes().unwrap(), &[0x01][..]);
        assert_eq!(false.to_bytes().unwrap(), &[0x00][..]);

        // Big-endian integers
        assert_eq!(300u32.to_bytes().unwrap(), &[0x00, 0x00, 0x01, 0x2C][..]);
        assert_eq!(0xABCDu16.to_bytes().unwrap(), &[0xAB, 0xCD][..]);
        assert_eq!((-1i16).to_bytes().unwrap(), &[0xFF, 0xFF][..]);
        assert_eq!(
            0x0123456789ABCDEFu64.to_bytes().unwrap(),
            &[0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF][..]
        );

        // IEEE-754 bit patterns, big-endian
        assert_eq!(1.0f32.to_bytes().unwrap(), &[0x3F, 0x80, 0x00, 0x00][..]);
        assert_eq!(
            (-1.0f64).to_bytes().unwrap(),
            &[0xBF, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00][..]
        );
        assert_eq!(
            f32::NAN.to_bytes().unwrap(),
            &f32::NAN.to_be_bytes()[..]
        );

        // Fixed-size array: no prefix
        assert_eq!([1u8, 2, 3].to_bytes().unwrap(), &[0x01, 0x02, 0x03][..]);

        // Option
        assert_eq!(
            Some(42u32).to_bytes().unwrap(),
            &[0x01, 0x00, 0x00, 0x00, 0x2A][..]
        );
        assert_eq!(None::<u32>.to_bytes().unwrap(), &[0x00][..]);

        // Unit
        assert_eq!(().to_bytes().unwrap(), &[][..]);
    }

    #[test]
    fn test_scenario_u32_round_trip_exact_quota() {
        let encoded = 300u32.to_bytes().unwrap();
        let mut quota = Quota::new(4);
        let mut buf = &encoded[..];
        let decoded = u32::unmarshal(&mut buf, &mut quota).unwrap();
        assert_eq!(decoded, 300);
        assert_eq!(quota.remaining(), 0);
    }

    #[test]
    fn test_bool_strict() {
        assert!(matches!(bool::from_bytes(&[0x02]), Err(Error::InvalidBool)));
        assert!(matches!(bool::from_bytes(&[0xFF]), Err(Error::InvalidBool)));
    }

    #[test]
    fn test_array_buffer_preflight() {
        // A 3-byte array cannot start into a 2-byte buffer.
        let mut data = [0u8; 2];
        let mut buf = &mut data[..];
        let mut quota = Quota::default();
        assert!(matches!(
            [1u8, 2, 3].marshal(&mut buf, &mut quota),
            Err(Error::EndOfBuffer)
        ));
        assert_eq!(quota.remaining(), crate::DEFAULT_QUOTA);
    }

    #[test]
    fn test_array_quota_preflight() {
        // Four u32 elements need 16 bytes of quota; the preflight alone
        // rejects anything under the 4-element lower bound.
        let mut data = [0u8; 16];
        let mut buf = &mut data[..];
        let mut quota = Quota::new(3);
        assert!(matches!(
            [1u32, 2, 3, 4].marshal(&mut buf, &mut quota),
            Err(Error::QuotaExceeded)
        ));
        assert_eq!(quota.remaining(), 3);
    }

    #[test]
    fn test_array_of_multibyte_elements() {
        let values = [0x01020304u32, 0x05060708];
        let encoded = values.to_bytes().unwrap();
        assert_eq!(encoded.len(), 8);
        let decoded = <[u32; 2]>::from_bytes(&encoded).unwrap();
        assert_eq!(values, decoded);
    }

    #[test]
    fn test_option_round_trip() {
        for value in [Some(42u32), None] {
            let encoded = value.to_bytes().unwrap();
            assert_eq!(encoded.len(), value.size_hint());
            let decoded = Option::<u32>::from_bytes(&encoded).unwrap();
            assert_eq!(value, decoded);
        }
    }

    #[test]
    fn test_box_transparent() {
        let boxed = Box::new(0xDEADBEEFu32);
        let encoded = boxed.to_bytes().unwrap();
        assert_eq!(encoded, 0xDEADBEEFu32.to_bytes().unwrap());
        let decoded = Box::<u32>::from_bytes(&encoded).unwrap();
        assert_eq!(boxed, decoded);
    }

    #[test]
    fn test_truncated_scalar() {
        assert!(matches!(
            u32::from_bytes(&[0x01, 0x02]),
            Err(Error::EndOfBuffer)
        ));
        let mut quota = Quota::new(1);
        let mut buf = &[0u8, 0, 0, 0][..];
        assert!(matches!(
            u32::unmarshal(&mut buf, &mut quota),
            Err(Error::QuotaExceeded)
        ));
        assert_eq!(quota.remaining(), 1);
    }
}
