/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! The v1.1 VarUInt scheme: the byte count is stored up front, in unary.
//!
//! # Encoding scheme
//!
//! An encoding of `n` bytes, read as a single little-endian integer `E`, is
//!
//! ```text
//! E = (value << n) | (1 << (n - 1))
//! ```
//!
//! The lowest `n - 1` bits are zero, bit `n - 1` is one, and the remaining
//! `7 * n` bits hold the value. The length therefore sits in the low bits of
//! the first byte, where a single `trailing_zeros` recovers it:
//!
//! ```text
//! value = 1024 (0b100_0000_0000, 11 bits => 2 bytes)
//!
//! E = 1024 << 2 | 0b10 = 0x1002
//!
//! 0000 0010 | 0001 0000
//!        ^^
//!        one zero bit, then the end bit: 2 bytes
//! ```
//!
//! Zero is a single byte holding only the end bit: `0000 0001`.
//!
//! Values of 57 to 64 bits need 9 or 10 bytes. Their first byte is all zeros
//! and the count continues into the low bits of the second byte:
//! `0x00, 0bxxxx_xxx1` is 9 bytes and `0x00, 0bxxxx_xx10` is 10 bytes.
//! Anything longer can't hold a `u64` canonically and is rejected.
//!
//! # Decoding cost
//!
//! Once the length is known, all payload bits are pulled out with one masked
//! little-endian load and a shift, whatever the length.

use std::io::Read;

use crate::codec::{Validation, VarUIntCodec, finish, read_exact_or_truncated};
use crate::encoded::{ENCODED_BUF_LEN, EncodedVarUInt};
use crate::magnitude::bit_length;
use crate::{Error, Magnitude, Result, Scheme, StreamError};

const BITS_PER_ENCODED_BYTE: u32 = 7;
const MAX_MAGNITUDE_BITS: u32 = u64::BITS;
/// Encodings up to this length keep their length bits in the first byte.
const SINGLE_HEADER_MAX_LEN: usize = u8::BITS as usize;

/// The v1.1 length-prefixed codec. See the [module docs](self).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LengthPrefixed;

/// Encoded size in bytes, indexed by the magnitude's leading zeros as a `u64`.
static BYTES_NEEDED: [u8; 65] = init_bytes_needed();

const fn init_bytes_needed() -> [u8; 65] {
    let mut cache = [0u8; 65];
    let mut leading_zeros = 0;
    while leading_zeros < 64 {
        let bits = 64 - leading_zeros as u32;
        cache[leading_zeros] = bits.div_ceil(BITS_PER_ENCODED_BYTE) as u8;
        leading_zeros += 1;
    }
    // Zero still takes a byte.
    cache[64] = 1;
    cache
}

/// Load the first `size` bytes of `bytes` as a little-endian `u64`.
///
/// `size` must be in `1..=8` and `bytes` at least `size` long.
#[inline(always)]
fn load_u64_le(bytes: &[u8], size: usize) -> u64 {
    match bytes.first_chunk::<8>() {
        Some(chunk) => u64::from_le_bytes(*chunk) & (u64::MAX >> (64 - 8 * size)),
        None => {
            let mut buffer = [0; 8];
            buffer[..size].copy_from_slice(&bytes[..size]);
            u64::from_le_bytes(buffer)
        }
    }
}

/// Load the first `size` bytes of `bytes` as a little-endian `u128`.
///
/// `size` must be in `9..=16` and `bytes` at least `size` long.
#[inline(always)]
fn load_u128_le(bytes: &[u8], size: usize) -> u128 {
    match bytes.first_chunk::<16>() {
        Some(chunk) => u128::from_le_bytes(*chunk) & (u128::MAX >> (128 - 8 * size)),
        None => {
            let mut buffer = [0; 16];
            buffer[..size].copy_from_slice(&bytes[..size]);
            u128::from_le_bytes(buffer)
        }
    }
}

#[inline(always)]
fn narrow_to_u64<T: Magnitude>(value: T) -> Result<u64> {
    u64::try_from(value.into_u128()).map_err(|_| Error::overflow(MAX_MAGNITUDE_BITS))
}

/// The encoded size announced by the header.
///
/// Only `first` is needed unless it's zero, in which case `second` carries
/// the rest of the count.
#[inline(always)]
const fn size_from_header(first: u8, second: u8) -> usize {
    if first != 0 {
        first.trailing_zeros() as usize + 1
    } else {
        SINGLE_HEADER_MAX_LEN + second.trailing_zeros() as usize + 1
    }
}

impl VarUIntCodec for LengthPrefixed {
    const SCHEME: Scheme = Scheme::LengthPrefixed;
    const MAX_MAGNITUDE_BITS: u32 = MAX_MAGNITUDE_BITS;
    const MAX_ENCODED_LEN: usize = MAX_MAGNITUDE_BITS.div_ceil(BITS_PER_ENCODED_BYTE) as usize;

    fn encoded_len<T: Magnitude>(value: T) -> Result<usize> {
        let value = narrow_to_u64(value)?;
        Ok(BYTES_NEEDED[value.leading_zeros() as usize] as usize)
    }

    fn encode<T: Magnitude>(value: T) -> Result<EncodedVarUInt> {
        let value = narrow_to_u64(value)?;
        let size = BYTES_NEEDED[value.leading_zeros() as usize] as usize;
        let mut buffer = [0; ENCODED_BUF_LEN];

        if size <= SINGLE_HEADER_MAX_LEN {
            // One flag bit per byte: the value and its length fit in a u64.
            let encoded = (value << size) | (1 << (size - 1));
            buffer[..8].copy_from_slice(&encoded.to_le_bytes());
        } else {
            let encoded = ((value as u128) << size) | (1 << (size - 1));
            buffer[..16].copy_from_slice(&encoded.to_le_bytes());
        }

        Ok(EncodedVarUInt::from_parts(buffer, 0, size))
    }

    fn decode_slice<T: Magnitude>(bytes: &[u8], validation: Validation) -> Result<(T, usize)> {
        let Some(&first) = bytes.first() else {
            return Err(Error::truncated(1, 0));
        };
        let second = if first != 0 {
            0
        } else {
            match bytes.get(1) {
                Some(&second) => second,
                None => return Err(Error::truncated(2, bytes.len())),
            }
        };

        let size = size_from_header(first, second);
        if size > Self::MAX_ENCODED_LEN {
            return Err(Error::overflow(MAX_MAGNITUDE_BITS));
        }
        if bytes.len() < size {
            return Err(Error::truncated(size, bytes.len()));
        }

        let magnitude = if size <= SINGLE_HEADER_MAX_LEN {
            (load_u64_le(bytes, size) >> size) as u128
        } else {
            // A 10-byte encoding has room for 70 bits.
            let magnitude = load_u128_le(bytes, size) >> size;
            if bit_length(magnitude) > MAX_MAGNITUDE_BITS {
                return Err(Error::overflow(MAX_MAGNITUDE_BITS));
            }
            magnitude
        };

        finish(magnitude, size, validation)
    }

    fn read_with<T: Magnitude, R: Read>(
        mut reader: R,
        validation: Validation,
    ) -> std::result::Result<(T, usize), StreamError> {
        let mut buffer = [0; ENCODED_BUF_LEN];

        read_exact_or_truncated(&mut reader, &mut buffer[..1], 0)?;
        let header_len = if buffer[0] != 0 {
            1
        } else {
            read_exact_or_truncated(&mut reader, &mut buffer[1..2], 1)?;
            2
        };

        let size = size_from_header(buffer[0], buffer[1]);
        if size > Self::MAX_ENCODED_LEN {
            return Err(Error::overflow(MAX_MAGNITUDE_BITS).into());
        }
        read_exact_or_truncated(&mut reader, &mut buffer[header_len..size], header_len)?;

        Ok(Self::decode_slice(&buffer[..size], validation)?)
    }
}
