/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::fmt;
use std::io::{Read, Write};

use crate::{
    EncodedVarUInt, Legacy, LengthPrefixed, Magnitude, Result, StreamError, Validation,
    VarUIntCodec,
};

/// Selects which VarUInt encoding to use.
///
/// Encoded bytes don't say which scheme produced them, so the caller must
/// pass the same scheme to both sides. Decoding with the wrong scheme is a
/// logical bug: it yields an error or a wrong value, but never reads out of
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// 7 payload bits plus an end flag per byte. See [`Legacy`].
    Legacy,
    /// The byte count in unary, up front. See [`LengthPrefixed`].
    LengthPrefixed,
}

macro_rules! dispatch {
    ($scheme:expr, $codec:ident => $call:expr) => {
        match $scheme {
            Scheme::Legacy => {
                type $codec = Legacy;
                $call
            }
            Scheme::LengthPrefixed => {
                type $codec = LengthPrefixed;
                $call
            }
        }
    };
}

impl Scheme {
    /// The scheme used by revision 1.0 of the format.
    pub const V1_0: Self = Self::Legacy;
    /// The scheme used by revision 1.1 of the format.
    pub const V1_1: Self = Self::LengthPrefixed;

    /// Both schemes, oldest first.
    pub const ALL: [Self; 2] = [Self::Legacy, Self::LengthPrefixed];

    /// The widest magnitude, in bits, this scheme can represent.
    pub const fn max_magnitude_bits(self) -> u32 {
        dispatch!(self, C => C::MAX_MAGNITUDE_BITS)
    }

    /// The longest encoding this scheme produces or accepts, in bytes.
    pub const fn max_encoded_len(self) -> usize {
        dispatch!(self, C => C::MAX_ENCODED_LEN)
    }

    /// Encode `value`. See [`VarUIntCodec::encode`].
    #[inline]
    pub fn encode<T: Magnitude>(self, value: T) -> Result<EncodedVarUInt> {
        dispatch!(self, C => C::encode(value))
    }

    /// The number of bytes `value` encodes to.
    #[inline]
    pub fn encoded_len<T: Magnitude>(self, value: T) -> Result<usize> {
        dispatch!(self, C => C::encoded_len(value))
    }

    /// Encode `value` and write it to `writer`, returning the number of bytes
    /// written.
    #[inline]
    pub fn encode_into<T: Magnitude, W: Write>(
        self,
        value: T,
        writer: W,
    ) -> std::result::Result<usize, StreamError> {
        dispatch!(self, C => C::encode_into(value, writer))
    }

    /// Decode a value starting at `offset`, accepting non-canonical encodings.
    #[inline]
    pub fn decode<T: Magnitude>(self, bytes: &[u8], offset: usize) -> Result<(T, usize)> {
        dispatch!(self, C => C::decode(bytes, offset))
    }

    /// Decode a value starting at `offset`.
    #[inline]
    pub fn decode_with<T: Magnitude>(
        self,
        bytes: &[u8],
        offset: usize,
        validation: Validation,
    ) -> Result<(T, usize)> {
        dispatch!(self, C => C::decode_with(bytes, offset, validation))
    }

    /// Read a value from `reader`, accepting non-canonical encodings.
    #[inline]
    pub fn read<T: Magnitude, R: Read>(
        self,
        reader: R,
    ) -> std::result::Result<(T, usize), StreamError> {
        dispatch!(self, C => C::read(reader))
    }

    /// Read a value from `reader`.
    #[inline]
    pub fn read_with<T: Magnitude, R: Read>(
        self,
        reader: R,
        validation: Validation,
    ) -> std::result::Result<(T, usize), StreamError> {
        dispatch!(self, C => C::read_with(reader, validation))
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("v1.0"),
            Self::LengthPrefixed => f.write_str("v1.1"),
        }
    }
}
