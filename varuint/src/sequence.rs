/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use crate::{Error, Magnitude, Result, Scheme, Validation};

/// Encodes a run of integers back-to-back into a single byte buffer.
///
/// Every value is written with the same [`Scheme`], so a [`VarUIntReader`]
/// built with that scheme can walk the buffer back.
#[derive(Debug, Clone)]
pub struct VarUIntWriter {
    scheme: Scheme,
    buffer: Vec<u8>,
    /// Track the number of encoded values.
    n_members: usize,
}

impl VarUIntWriter {
    /// Create a new `VarUIntWriter` with room for `cap` bytes.
    pub fn new(scheme: Scheme, cap: usize) -> Self {
        Self {
            scheme,
            buffer: Vec::with_capacity(cap),
            n_members: 0,
        }
    }

    /// The scheme values are encoded with.
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Append an integer.
    ///
    /// # Return Value
    ///
    /// The number of bytes appended. Nothing is appended on error.
    pub fn write<T: Magnitude>(&mut self, value: T) -> Result<usize> {
        let encoded = self.scheme.encode(value)?;
        self.buffer.extend_from_slice(&encoded);
        self.n_members += 1;

        Ok(encoded.len())
    }

    /// Get a reference to the internal byte buffer.
    #[inline(always)]
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// The number of bytes written so far.
    #[inline(always)]
    pub fn bytes_len(&self) -> usize {
        self.buffer.len()
    }

    /// The number of values written so far.
    #[inline(always)]
    pub const fn count(&self) -> usize {
        self.n_members
    }

    /// Drop all encoded values, keeping the buffer capacity.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.n_members = 0;
    }

    /// Take the encoded bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

/// Decodes a run of back-to-back integers from a byte slice.
///
/// The reader owns its cursor; the slice is never modified.
/// As an [`Iterator`] it yields `u64`s and stops after the first error.
#[derive(Debug, Clone)]
pub struct VarUIntReader<'a> {
    scheme: Scheme,
    validation: Validation,
    bytes: &'a [u8],
    position: usize,
    failed: bool,
}

impl<'a> VarUIntReader<'a> {
    /// Create a reader over `bytes`, accepting non-canonical encodings.
    pub const fn new(scheme: Scheme, bytes: &'a [u8]) -> Self {
        Self::with_validation(scheme, bytes, Validation::Permissive)
    }

    /// Create a reader over `bytes` with the given validation.
    pub const fn with_validation(scheme: Scheme, bytes: &'a [u8], validation: Validation) -> Self {
        Self {
            scheme,
            validation,
            bytes,
            position: 0,
            failed: false,
        }
    }

    /// The offset of the next value.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The number of bytes left to decode.
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Whether every byte has been consumed.
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Decode the next value.
    ///
    /// The position only advances on success; after an error it still points
    /// at the start of the value that failed.
    pub fn read<T: Magnitude>(&mut self) -> Result<T> {
        let (value, size) = self
            .scheme
            .decode_with(self.bytes, self.position, self.validation)?;
        self.position += size;
        Ok(value)
    }
}

impl Iterator for VarUIntReader<'_> {
    type Item = std::result::Result<u64, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.is_empty() {
            return None;
        }
        let item = self.read();
        self.failed = item.is_err();
        Some(item)
    }
}
