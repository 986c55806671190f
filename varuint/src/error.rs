/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Error types for VarUInt encoding and decoding.

use std::io;

/// A specialized Result type for VarUInt operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when encoding or decoding a VarUInt.
///
/// The same taxonomy is shared by both schemes, so callers can switch
/// schemes without touching their error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input ended before a complete value could be decoded.
    ///
    /// This is recoverable: a streaming caller can retry once more bytes
    /// are available.
    #[error("truncated VarUInt: need at least {needed} bytes, {available} available")]
    TruncatedInput {
        /// A lower bound on the total number of bytes the value occupies.
        needed: usize,
        /// The number of bytes that were available from the decode offset.
        available: usize,
    },

    /// The magnitude does not fit in the target integer width.
    #[error("VarUInt magnitude does not fit in {max_bits} bits")]
    Overflow {
        /// The width, in bits, that was exceeded.
        max_bits: u32,
    },

    /// The encoding is valid but longer than necessary.
    ///
    /// Only reported when decoding with [`Validation::Strict`](crate::Validation::Strict).
    #[error("non-canonical VarUInt: {size} bytes used, {canonical_size} required")]
    NonCanonicalEncoding {
        /// The number of bytes used by the encoding.
        size: usize,
        /// The number of bytes the canonical encoding would use.
        canonical_size: usize,
    },
}

impl Error {
    #[cold]
    pub(crate) fn truncated(needed: usize, available: usize) -> Self {
        tracing::trace!(needed, available, "truncated VarUInt");
        Self::TruncatedInput { needed, available }
    }

    #[cold]
    pub(crate) fn overflow(max_bits: u32) -> Self {
        tracing::debug!(max_bits, "VarUInt overflow");
        Self::Overflow { max_bits }
    }

    #[cold]
    pub(crate) fn non_canonical(size: usize, canonical_size: usize) -> Self {
        tracing::debug!(size, canonical_size, "rejecting non-canonical VarUInt");
        Self::NonCanonicalEncoding {
            size,
            canonical_size,
        }
    }
}

/// Errors returned by the entry points that talk to a [`std::io::Read`] or
/// [`std::io::Write`].
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The bytes themselves were invalid, or the stream ended mid-value.
    #[error(transparent)]
    Codec(#[from] Error),

    /// The underlying reader or writer failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl StreamError {
    /// The codec error, if this isn't an I/O failure.
    pub const fn codec_error(&self) -> Option<Error> {
        match self {
            Self::Codec(error) => Some(*error),
            Self::Io(_) => None,
        }
    }
}
