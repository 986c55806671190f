/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Variable-length encoding for unsigned integers ("VarUInt").
//!
//! # Usecase
//!
//! A binary interchange format stores lengths, symbol ids and other unsigned
//! fields with as few bytes as their magnitude allows. Two revisions of the
//! format encode them differently, and this crate implements both:
//!
//! - [`Legacy`] (v1.0): every byte carries 7 payload bits and an end flag.
//!   Decoding has to look at each byte to find the last one.
//! - [`LengthPrefixed`] (v1.1): the byte count is written up front, in
//!   unary, in the low bits of the first byte. Decoding finds it with a single
//!   `trailing_zeros` and then extracts every payload bit at once.
//!
//! For the same value both schemes produce the same number of bytes, one per
//! 7 bits of magnitude; they only differ in where the framing bits sit.
//!
//! # Choosing a scheme
//!
//! Bytes don't record which scheme wrote them. Callers pick one through
//! [`Scheme`], usually once per stream, and pass it to both sides:
//!
//! ```
//! use varuint::Scheme;
//!
//! let encoded = varuint::encode(Scheme::V1_1, 1024u64).unwrap();
//! assert_eq!(encoded, [0x02, 0x10]);
//!
//! let (value, consumed): (u64, usize) = varuint::decode(Scheme::V1_1, &encoded, 0).unwrap();
//! assert_eq!((value, consumed), (1024, 2));
//! ```
//!
//! When the scheme is fixed at compile time, call the [`VarUIntCodec`]
//! implementations directly instead.
//!
//! # Cursors
//!
//! Decoding takes the caller's buffer and an offset into it and returns the
//! number of bytes consumed; the caller advances its own cursor.
//! [`VarUIntReader`] does that bookkeeping for a run of values.

mod codec;
mod encoded;
mod error;
mod legacy;
mod length_prefixed;
mod magnitude;
mod scheme;
mod sequence;

pub use codec::{Validation, VarUIntCodec};
pub use encoded::EncodedVarUInt;
pub use error::{Error, Result, StreamError};
pub use legacy::Legacy;
pub use length_prefixed::LengthPrefixed;
pub use magnitude::Magnitude;
pub use scheme::Scheme;
pub use sequence::{VarUIntReader, VarUIntWriter};

/// Encode `value` with the given scheme.
///
/// Fails with [`Error::Overflow`] if `value` is wider than the scheme supports.
#[inline]
pub fn encode<T: Magnitude>(scheme: Scheme, value: T) -> Result<EncodedVarUInt> {
    scheme.encode(value)
}

/// Decode a value starting at `offset` in `bytes` with the given scheme.
///
/// Returns the value and the number of bytes it occupied. Non-canonical
/// encodings are accepted; see [`decode_with`] to reject them.
#[inline]
pub fn decode<T: Magnitude>(scheme: Scheme, bytes: &[u8], offset: usize) -> Result<(T, usize)> {
    scheme.decode(bytes, offset)
}

/// Decode a value starting at `offset` in `bytes`, with explicit validation.
#[inline]
pub fn decode_with<T: Magnitude>(
    scheme: Scheme,
    bytes: &[u8],
    offset: usize,
    validation: Validation,
) -> Result<(T, usize)> {
    scheme.decode_with(bytes, offset, validation)
}
