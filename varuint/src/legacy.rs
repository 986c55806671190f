/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! The v1.0 VarUInt scheme: 7 payload bits per byte plus an end flag.
//!
//! # Encoding scheme
//!
//! Each integer is represented as a sequence of byte-sized blocks, most
//! significant block first.
//! The most-significant bit in each block is the **end flag**.
//! If the end flag is set to 0, more blocks follow.
//! If the end flag is set to 1, the current block is the last block.
//!
//! # Example
//!
//! 1,984,385 needs 21 bits, so it's split into three 7-bit groups:
//!
//! ```text
//! 1111001 0001111 0000001
//! ```
//!
//! Each group becomes a block, and only the last one carries the end flag:
//!
//! ```text
//! 0111 1001 | 0000 1111 | 1000 0001
//! ^           ^           ^
//! 0: more     0: more     1: end
//! ```
//!
//! Zero is a single block with only the end flag set: `1000 0000`.
//!
//! # Decoding cost
//!
//! The length of an encoding is only known once its last block has been
//! found, so decoding inspects every block in turn.
//! The loop is capped at the number of blocks needed for the target type
//! (e.g. 10 for a `u64`), which bounds the work on malformed input.

use std::io::Read;

use crate::codec::{Validation, VarUIntCodec, finish, read_exact_or_truncated};
use crate::encoded::{ENCODED_BUF_LEN, EncodedVarUInt};
use crate::{Error, Magnitude, Result, Scheme, StreamError};

const BITS_PER_ENCODED_BYTE: u32 = 7;
const PAYLOAD_MASK: u8 = 0b0111_1111;
const END_FLAG: u8 = 0b1000_0000;

/// The v1.0 continuation-flag codec. See the [module docs](self).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Legacy;

/// The number of blocks needed to hold a `bits`-wide magnitude.
const fn max_blocks(bits: u32) -> usize {
    bits.div_ceil(BITS_PER_ENCODED_BYTE) as usize
}

/// Append the payload of `byte` to `magnitude`.
#[inline(always)]
fn accumulate(magnitude: u128, byte: u8) -> Result<u128> {
    // Shifting must not push set bits out of the accumulator.
    if magnitude.leading_zeros() < BITS_PER_ENCODED_BYTE {
        return Err(Error::overflow(u128::BITS));
    }
    Ok((magnitude << BITS_PER_ENCODED_BYTE) | (byte & PAYLOAD_MASK) as u128)
}

impl VarUIntCodec for Legacy {
    const SCHEME: Scheme = Scheme::Legacy;
    const MAX_MAGNITUDE_BITS: u32 = u128::BITS;
    const MAX_ENCODED_LEN: usize = max_blocks(u128::BITS);

    fn encode<T: Magnitude>(value: T) -> Result<EncodedVarUInt> {
        let mut magnitude = value.into_u128();
        // Blocks are produced least significant first, so we fill the buffer
        // from the end. The first block we write is the last one read back,
        // and it's the only one carrying the end flag.
        let mut buffer = [0; ENCODED_BUF_LEN];
        let mut pos = ENCODED_BUF_LEN - 1;
        buffer[pos] = END_FLAG | (magnitude as u8 & PAYLOAD_MASK);
        magnitude >>= BITS_PER_ENCODED_BYTE;
        while magnitude != 0 {
            pos -= 1;
            buffer[pos] = magnitude as u8 & PAYLOAD_MASK;
            magnitude >>= BITS_PER_ENCODED_BYTE;
        }

        Ok(EncodedVarUInt::from_parts(buffer, pos, ENCODED_BUF_LEN))
    }

    fn decode_slice<T: Magnitude>(bytes: &[u8], validation: Validation) -> Result<(T, usize)> {
        let max_len = max_blocks(T::BITS);
        let mut magnitude: u128 = 0;

        for size in 1..=max_len {
            let Some(&byte) = bytes.get(size - 1) else {
                return Err(Error::truncated(size, bytes.len()));
            };
            magnitude = accumulate(magnitude, byte)?;
            if byte & END_FLAG != 0 {
                return finish(magnitude, size, validation);
            }
        }

        // Every block we were willing to read asked for another one.
        Err(Error::overflow(T::BITS))
    }

    fn read_with<T: Magnitude, R: Read>(
        mut reader: R,
        validation: Validation,
    ) -> std::result::Result<(T, usize), StreamError> {
        let max_len = max_blocks(T::BITS);
        let mut buffer = [0; ENCODED_BUF_LEN];

        // Pull one block at a time so we never consume bytes past the end
        // of this value, then decode what we collected.
        let mut size = 0;
        while size < max_len {
            read_exact_or_truncated(&mut reader, &mut buffer[size..size + 1], size)?;
            size += 1;
            if buffer[size - 1] & END_FLAG != 0 {
                break;
            }
        }

        Ok(Self::decode_slice(&buffer[..size], validation)?)
    }
}
