/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Supporting types and functions for benchmarking the VarUInt schemes.
//!
//! Every benchmark compares [`Scheme::V1_0`] against [`Scheme::V1_1`] on the
//! same data: random integers whose raw width is 1 to 8 bytes.

pub use bencher::VarUIntBencher;

pub mod bencher;

use rand::{Rng as _, SeedableRng as _, rngs::StdRng};
use varuint::{Error, Scheme, VarUIntReader, VarUIntWriter};

/// How many integers each width is benchmarked with.
pub const NUM_INTEGERS: usize = 10_000;

/// The seed all benchmark data is generated from.
pub const SEED: u64 = 1024;

/// The raw integer widths, in bytes, the benchmarks sweep over.
pub const WIDTHS: std::ops::RangeInclusive<usize> = 1..=8;

/// Generate `num_ints` integers uniformly distributed over
/// `0..=2^(8 * int_size_in_bytes) - 1`.
///
/// The output only depends on the arguments.
pub fn generate_integers(int_size_in_bytes: usize, num_ints: usize) -> Vec<u64> {
    let max_value = max_value_for_width(int_size_in_bytes);
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..num_ints).map(|_| rng.random_range(0..=max_value)).collect()
}

/// The largest value that fits in `int_size_in_bytes` bytes.
pub const fn max_value_for_width(int_size_in_bytes: usize) -> u64 {
    let bits = int_size_in_bytes as u32 * 8;
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Encode `values` back-to-back with `scheme`.
pub fn encode_all(scheme: Scheme, values: &[u64]) -> Result<Vec<u8>, Error> {
    let mut writer = VarUIntWriter::new(scheme, values.len() * 8);
    for &value in values {
        writer.write(value)?;
    }
    Ok(writer.into_inner())
}

/// Decode every value in `bytes` with `scheme`.
pub fn decode_all(scheme: Scheme, bytes: &[u8]) -> Result<Vec<u64>, Error> {
    VarUIntReader::new(scheme, bytes).collect()
}

/// Errors from checking that a scheme round-trips the benchmark data.
#[derive(Debug, thiserror::Error)]
pub enum RoundtripError {
    /// Encoding or decoding failed outright.
    #[error(transparent)]
    Codec(#[from] Error),

    /// Decoding succeeded but produced different values.
    #[error("{scheme} decoded {actual:?} at index {index}, expected {expected:?}")]
    Mismatch {
        scheme: Scheme,
        index: usize,
        /// `None` when the decoded run is longer than the input.
        expected: Option<u64>,
        /// `None` when the decoded run is shorter than the input.
        actual: Option<u64>,
    },
}

/// Encode `values` with `scheme`, decode them back and check nothing changed.
///
/// Returns the encoded bytes.
pub fn roundtrip(scheme: Scheme, values: &[u64]) -> Result<Vec<u8>, RoundtripError> {
    let encoded = encode_all(scheme, values)?;
    let decoded = decode_all(scheme, &encoded)?;
    check_decoded(scheme, values, &decoded)?;
    Ok(encoded)
}

/// Compare `decoded` against `expected`, reporting the first difference.
pub fn check_decoded(
    scheme: Scheme,
    expected: &[u64],
    decoded: &[u64],
) -> Result<(), RoundtripError> {
    let len = expected.len().max(decoded.len());
    match (0..len).find(|&i| expected.get(i) != decoded.get(i)) {
        None => Ok(()),
        Some(index) => Err(RoundtripError::Mismatch {
            scheme,
            index,
            expected: expected.get(index).copied(),
            actual: decoded.get(index).copied(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn data_is_reproducible() {
        assert_eq!(generate_integers(3, 100), generate_integers(3, 100));
    }

    #[test]
    fn data_respects_width() {
        for width in WIDTHS {
            let max = max_value_for_width(width);
            assert!(generate_integers(width, 500).iter().all(|&v| v <= max));
        }
        assert_eq!(max_value_for_width(1), 255);
        assert_eq!(max_value_for_width(8), u64::MAX);
    }

    #[test]
    fn roundtrip_returns_the_encoding() {
        let values = generate_integers(2, 50);
        for scheme in Scheme::ALL {
            assert_eq!(
                roundtrip(scheme, &values).unwrap(),
                encode_all(scheme, &values).unwrap()
            );
        }
    }

    #[test]
    fn changed_values_are_reported() {
        let error = check_decoded(Scheme::V1_1, &[1, 2, 3], &[1, 5, 3]).unwrap_err();
        assert!(matches!(
            error,
            RoundtripError::Mismatch {
                scheme: Scheme::LengthPrefixed,
                index: 1,
                expected: Some(2),
                actual: Some(5),
            }
        ));
    }

    #[test]
    fn missing_values_are_reported() {
        let error = check_decoded(Scheme::V1_0, &[1, 2], &[1]).unwrap_err();
        assert!(matches!(
            error,
            RoundtripError::Mismatch {
                index: 1,
                expected: Some(2),
                actual: None,
                ..
            }
        ));
        assert!(check_decoded(Scheme::V1_0, &[7], &[7]).is_ok());
    }

    #[test]
    fn schemes_agree_on_size_and_values() {
        let values = generate_integers(5, 1000);
        let legacy = encode_all(Scheme::V1_0, &values).unwrap();
        let length_prefixed = encode_all(Scheme::V1_1, &values).unwrap();
        assert_eq!(legacy.len(), length_prefixed.len());
        assert_eq!(decode_all(Scheme::V1_0, &legacy).unwrap(), values);
        assert_eq!(decode_all(Scheme::V1_1, &length_prefixed).unwrap(), values);
    }
}
