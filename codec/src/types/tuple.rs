//! Codec implementations for tuples.
//!
//! Tuples encode like structs: fields back to back in declaration order,
//! with no prefix or separators.

use crate::{Error, Marshal, Quota, SizeHint, Unmarshal};
use bytes::{Buf, BufMut};
use paste::paste;

macro_rules! impl_codec_for_tuple {
    ($($index:literal),*) => {
        paste! {
            impl<$( [<T $index>]: SizeHint ),*> SizeHint for ( $( [<T $index>], )* ) {
                #[inline]
                fn size_hint(&self) -> usize {
                    0 $( + self.$index.size_hint() )*
                }
            }

            impl<$( [<T $index>]: Marshal ),*> Marshal for ( $( [<T $index>], )* ) {
                #[inline]
                fn marshal(&self, buf: &mut impl BufMut, quota: &mut Quota) -> Result<(), Error> {
                    $( self.$index.marshal(buf, quota)?; )*
                    Ok(())
                }
            }

            impl<$( [<T $index>]: Unmarshal ),*> Unmarshal for ( $( [<T $index>], )* ) {
                #[inline]
                fn unmarshal(buf: &mut impl Buf, quota: &mut Quota) -> Result<Self, Error> {
                    Ok(( $( [<T $index>]::unmarshal(buf, quota)?, )* ))
                }
            }
        }
    };
}

// Generate implementations for tuple sizes 1 through 12
impl_codec_for_tuple!(0);
impl_codec_for_tuple!(0, 1);
impl_codec_for_tuple!(0, 1, 2);
impl_codec_for_tuple!(0, 1, 2, 3);
impl_codec_for_tuple!(0, 1, 2, 3, 4);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11);
