/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::io::{self, Read, Write};

use crate::magnitude::{bit_length, canonical_len};
use crate::{EncodedVarUInt, Error, Magnitude, Result, Scheme, StreamError};

/// How strictly decoding checks that an encoding is canonical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Validation {
    /// Accept non-minimal encodings and return their numeric value.
    #[default]
    Permissive,
    /// Reject non-minimal encodings with [`Error::NonCanonicalEncoding`].
    Strict,
}

impl Validation {
    /// Whether non-canonical encodings are rejected.
    #[inline(always)]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Encode and decode unsigned integers under a single VarUInt scheme.
///
/// Implemented by [`Legacy`](crate::Legacy) and
/// [`LengthPrefixed`](crate::LengthPrefixed). Use the trait directly when the
/// scheme is known at compile time, or [`Scheme`] to pick one at runtime.
pub trait VarUIntCodec {
    /// The scheme tag for this codec.
    const SCHEME: Scheme;

    /// The widest magnitude, in bits, this codec can represent.
    const MAX_MAGNITUDE_BITS: u32;

    /// The longest encoding this codec produces or accepts, in bytes.
    const MAX_ENCODED_LEN: usize;

    /// Encode `value`.
    ///
    /// Fails with [`Error::Overflow`] if `value` is wider than
    /// [`Self::MAX_MAGNITUDE_BITS`].
    fn encode<T: Magnitude>(value: T) -> Result<EncodedVarUInt>;

    /// Decode a value from the start of `bytes`.
    ///
    /// Returns the value together with the number of bytes it occupied.
    /// Never reads past the end of `bytes`.
    fn decode_slice<T: Magnitude>(bytes: &[u8], validation: Validation) -> Result<(T, usize)>;

    /// Read a value from `reader`, consuming exactly the bytes of its encoding.
    fn read_with<T: Magnitude, R: Read>(
        reader: R,
        validation: Validation,
    ) -> std::result::Result<(T, usize), StreamError>;

    /// The number of bytes `value` encodes to.
    fn encoded_len<T: Magnitude>(value: T) -> Result<usize> {
        let magnitude = value.into_u128();
        if bit_length(magnitude) > Self::MAX_MAGNITUDE_BITS {
            return Err(Error::overflow(Self::MAX_MAGNITUDE_BITS));
        }
        Ok(canonical_len(magnitude))
    }

    /// Encode `value` and write it to `writer`.
    ///
    /// Returns the number of bytes written.
    fn encode_into<T: Magnitude, W: Write>(
        value: T,
        mut writer: W,
    ) -> std::result::Result<usize, StreamError> {
        let encoded = Self::encode(value)?;
        writer.write_all(&encoded)?;
        Ok(encoded.len())
    }

    /// Decode a value starting at `offset` in `bytes`, accepting
    /// non-canonical encodings.
    fn decode<T: Magnitude>(bytes: &[u8], offset: usize) -> Result<(T, usize)> {
        Self::decode_with(bytes, offset, Validation::Permissive)
    }

    /// Decode a value starting at `offset` in `bytes`.
    ///
    /// An `offset` past the end of `bytes` is reported as
    /// [`Error::TruncatedInput`].
    fn decode_with<T: Magnitude>(
        bytes: &[u8],
        offset: usize,
        validation: Validation,
    ) -> Result<(T, usize)> {
        let tail = bytes.get(offset..).ok_or_else(|| Error::truncated(1, 0))?;
        Self::decode_slice(tail, validation)
    }

    /// Read a value from `reader`, accepting non-canonical encodings.
    fn read<T: Magnitude, R: Read>(reader: R) -> std::result::Result<(T, usize), StreamError> {
        Self::read_with(reader, Validation::Permissive)
    }
}

/// Narrow a decoded magnitude to the target type and apply `validation`.
#[inline(always)]
pub(crate) fn finish<T: Magnitude>(
    magnitude: u128,
    size: usize,
    validation: Validation,
) -> Result<(T, usize)> {
    let value = T::from_u128(magnitude).ok_or_else(|| Error::overflow(T::BITS))?;
    if validation.is_strict() {
        let canonical_size = canonical_len(magnitude);
        if size != canonical_size {
            return Err(Error::non_canonical(size, canonical_size));
        }
    }
    Ok((value, size))
}

/// Fill `buf` from `reader`, reporting a premature end of stream as
/// [`Error::TruncatedInput`].
///
/// `consumed` is the number of bytes of the current value already read.
/// Bytes received before the end of stream count as available, so the error
/// matches what decoding the same bytes from a slice reports.
pub(crate) fn read_exact_or_truncated<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    consumed: usize,
) -> std::result::Result<(), StreamError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(Error::truncated(consumed + buf.len(), consumed + filled).into());
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
