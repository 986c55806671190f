/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::ops::Deref;

/// Enough room for the longest encoding either scheme produces:
/// 19 bytes for `u128::MAX` under the legacy scheme.
pub(crate) const ENCODED_BUF_LEN: usize = 19;

/// A single encoded VarUInt, stored inline.
///
/// Dereferences to the encoded bytes.
#[derive(Clone, Copy)]
pub struct EncodedVarUInt {
    buf: [u8; ENCODED_BUF_LEN],
    start: u8,
    end: u8,
}

impl EncodedVarUInt {
    /// Wrap `buf`, exposing the bytes in `start..end`.
    ///
    /// Callers guarantee `start <= end <= ENCODED_BUF_LEN`.
    #[inline(always)]
    pub(crate) const fn from_parts(buf: [u8; ENCODED_BUF_LEN], start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= ENCODED_BUF_LEN);
        Self {
            buf,
            start: start as u8,
            end: end as u8,
        }
    }

    /// The encoded bytes.
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[self.start as usize..self.end as usize]
    }

    /// The number of encoded bytes.
    #[inline(always)]
    #[allow(clippy::len_without_is_empty)] // an encoding is never empty
    pub const fn len(&self) -> usize {
        (self.end - self.start) as usize
    }
}

impl Deref for EncodedVarUInt {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl AsRef<[u8]> for EncodedVarUInt {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl std::fmt::Debug for EncodedVarUInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EncodedVarUInt")
            .field(&format_args!("{:02X?}", self.as_slice()))
            .finish()
    }
}

impl PartialEq for EncodedVarUInt {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for EncodedVarUInt {}

impl std::hash::Hash for EncodedVarUInt {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl PartialEq<[u8]> for EncodedVarUInt {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for EncodedVarUInt {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_slice() == other
    }
}
