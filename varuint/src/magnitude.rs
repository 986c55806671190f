/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::fmt::Debug;

mod private {
    pub trait Sealed {}
}

/// An unsigned integer type that can be encoded as, or decoded into, a VarUInt.
///
/// The trait is sealed: it's implemented for the primitive unsigned integer
/// types and cannot be implemented outside of this crate.
///
/// Both codecs widen to `u128` internally, then narrow back to the target
/// type, reporting [`Error::Overflow`](crate::Error::Overflow) when the value
/// doesn't fit.
pub trait Magnitude: private::Sealed + Copy + Debug + Eq + Send + Sync + 'static {
    /// The width of the type, in bits.
    const BITS: u32;

    /// Widen the value to a `u128`. Never loses information.
    fn into_u128(self) -> u128;

    /// Narrow a `u128` to this type, returning `None` if it doesn't fit.
    fn from_u128(value: u128) -> Option<Self>;
}

macro_rules! impl_magnitude {
    ($($ty:ident),* $(,)?) => {
        $(
            impl private::Sealed for $ty {}

            impl Magnitude for $ty {
                const BITS: u32 = $ty::BITS;

                #[inline(always)]
                fn into_u128(self) -> u128 {
                    self as u128
                }

                #[inline(always)]
                fn from_u128(value: u128) -> Option<Self> {
                    $ty::try_from(value).ok()
                }
            }
        )*
    };
}

impl_magnitude!(u8, u16, u32, u64, u128, usize);

/// The number of significant bits in `value`. Zero has no significant bits.
#[inline(always)]
pub(crate) const fn bit_length(value: u128) -> u32 {
    u128::BITS - value.leading_zeros()
}

/// The canonical number of encoded bytes for `value`.
///
/// Both schemes spend one bit of every byte on framing, so both need one byte
/// per 7 bits of magnitude, and at least one byte for zero.
#[inline(always)]
pub(crate) const fn canonical_len(value: u128) -> usize {
    let bits = bit_length(value);
    if bits == 0 {
        1
    } else {
        bits.div_ceil(7) as usize
    }
}
