/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::io::Cursor;

use pretty_assertions::assert_eq;
use varuint::{Error, Legacy, LengthPrefixed, Scheme, Validation, VarUIntCodec};

#[test]
fn test_version_aliases() {
    assert_eq!(Scheme::V1_0, Scheme::Legacy);
    assert_eq!(Scheme::V1_1, Scheme::LengthPrefixed);
    assert_eq!(Scheme::V1_0.to_string(), "v1.0");
    assert_eq!(Scheme::V1_1.to_string(), "v1.1");
    assert_eq!(Legacy::SCHEME, Scheme::V1_0);
    assert_eq!(LengthPrefixed::SCHEME, Scheme::V1_1);
}

#[test]
fn test_public_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Scheme>();
    assert_send_sync::<Error>();
    assert_send_sync::<varuint::StreamError>();
    assert_send_sync::<varuint::EncodedVarUInt>();
    assert_send_sync::<varuint::VarUIntWriter>();
    assert_send_sync::<varuint::VarUIntReader<'static>>();
}

#[test]
fn test_limits() {
    assert_eq!(Scheme::Legacy.max_magnitude_bits(), 128);
    assert_eq!(Scheme::Legacy.max_encoded_len(), 19);
    assert_eq!(Scheme::LengthPrefixed.max_magnitude_bits(), 64);
    assert_eq!(Scheme::LengthPrefixed.max_encoded_len(), 10);
}

#[test]
fn test_dispatch_matches_codecs() {
    let values = [0u64, 1, 127, 128, 16383, 16384, 1 << 56, u64::MAX];
    for value in values {
        assert_eq!(
            varuint::encode(Scheme::Legacy, value).unwrap(),
            Legacy::encode(value).unwrap()
        );
        assert_eq!(
            varuint::encode(Scheme::LengthPrefixed, value).unwrap(),
            LengthPrefixed::encode(value).unwrap()
        );
    }
}

#[test]
fn test_zero_and_seven_bit_boundary() {
    assert_eq!(varuint::encode(Scheme::Legacy, 0u64).unwrap(), [0x80]);
    assert_eq!(varuint::encode(Scheme::LengthPrefixed, 0u64).unwrap(), [0x01]);
    for scheme in Scheme::ALL {
        assert_eq!(scheme.encode(127u8).unwrap().len(), 1, "{scheme}");
        assert_eq!(scheme.encode(128u8).unwrap().len(), 2, "{scheme}");
    }
}

#[test]
fn test_width_boundaries() {
    // Both schemes step up one byte right after each 2^(7k) - 1.
    for scheme in Scheme::ALL {
        for k in 1..=9u32 {
            let max_for_width = (1u64 << (7 * k)) - 1;
            assert_eq!(scheme.encoded_len(max_for_width), Ok(k as usize));
            assert_eq!(scheme.encoded_len(max_for_width + 1), Ok(k as usize + 1));
            assert_eq!(scheme.encode(max_for_width).unwrap().len(), k as usize);
        }
        assert_eq!(scheme.encoded_len(u64::MAX), Ok(10));
    }
}

#[test]
fn test_identical_error_taxonomy() {
    for scheme in Scheme::ALL {
        assert_eq!(
            varuint::decode::<u64>(scheme, &[], 0),
            Err(Error::TruncatedInput {
                needed: 1,
                available: 0
            }),
            "{scheme}"
        );
    }
}

#[test]
fn test_strict_validation() {
    let cases = [
        (Scheme::Legacy, [0x00, 0x81]),
        (Scheme::LengthPrefixed, [0x06, 0x00]),
    ];
    for (scheme, bytes) in cases {
        assert_eq!(varuint::decode::<u64>(scheme, &bytes, 0).unwrap(), (1, 2));
        assert_eq!(
            varuint::decode_with::<u64>(scheme, &bytes, 0, Validation::Strict),
            Err(Error::NonCanonicalEncoding {
                size: 2,
                canonical_size: 1
            })
        );
    }
    assert_eq!(Validation::default(), Validation::Permissive);
}

#[test]
fn test_scheme_mismatch_is_deterministic() {
    // v1.1 bytes decoded as v1.0: no panic, same answer every time.
    let encoded = varuint::encode(Scheme::LengthPrefixed, 1024u64).unwrap();
    let first = varuint::decode::<u64>(Scheme::Legacy, &encoded, 0);
    let second = varuint::decode::<u64>(Scheme::Legacy, &encoded, 0);
    assert_eq!(first, second);
    // 0x02 has no end flag and 0x10 doesn't either.
    assert_eq!(
        first,
        Err(Error::TruncatedInput {
            needed: 3,
            available: 2
        })
    );
}

#[test]
fn test_read_through_scheme() {
    for scheme in Scheme::ALL {
        let mut stream = Vec::new();
        scheme.encode_into(300u32, &mut stream).unwrap();
        scheme.encode_into(7u32, &mut stream).unwrap();

        let mut cursor = Cursor::new(stream);
        assert_eq!(scheme.read::<u32, _>(&mut cursor).unwrap(), (300, 2));
        assert_eq!(
            scheme
                .read_with::<u32, _>(&mut cursor, Validation::Strict)
                .unwrap(),
            (7, 1)
        );
    }
}

#[test]
fn test_stream_and_slice_report_the_same_truncation() {
    let values = [0u64, 300, 1_984_385, 1 << 56, u64::MAX];
    for scheme in Scheme::ALL {
        for value in values {
            let encoded = scheme.encode(value).unwrap();
            for len in 0..encoded.len() {
                let prefix = &encoded[..len];
                let from_slice = scheme.decode::<u64>(prefix, 0).unwrap_err();
                let from_stream = scheme.read::<u64, _>(prefix).unwrap_err();
                assert_eq!(
                    from_stream.codec_error(),
                    Some(from_slice),
                    "{scheme}: {len}-byte prefix of {value}"
                );
            }
        }
    }
}

mod property_based {
    #![cfg(not(miri))]
    use super::*;
    use proptest::prelude::*;
    use proptest_derive::Arbitrary;

    /// Mirrors [`Scheme`] so proptest can pick one.
    #[derive(Debug, Clone, Copy, Arbitrary)]
    enum AnyScheme {
        Legacy,
        LengthPrefixed,
    }

    impl From<AnyScheme> for Scheme {
        fn from(scheme: AnyScheme) -> Self {
            match scheme {
                AnyScheme::Legacy => Scheme::Legacy,
                AnyScheme::LengthPrefixed => Scheme::LengthPrefixed,
            }
        }
    }

    fn minimal_len(value: u64) -> usize {
        let bits = u64::BITS - value.leading_zeros();
        bits.div_ceil(7).max(1) as usize
    }

    proptest! {
        #[test]
        fn test_roundtrip(scheme: AnyScheme, v: u64) {
            let scheme = Scheme::from(scheme);
            let encoded = varuint::encode(scheme, v).unwrap();
            prop_assert_eq!(varuint::decode::<u64>(scheme, &encoded, 0).unwrap(), (v, encoded.len()));
        }

        #[test]
        fn test_minimal_length(scheme: AnyScheme, v: u64) {
            let scheme = Scheme::from(scheme);
            prop_assert_eq!(varuint::encode(scheme, v).unwrap().len(), minimal_len(v));
        }

        #[test]
        fn test_both_schemes_agree_on_length(v: u64) {
            prop_assert_eq!(
                varuint::encode(Scheme::Legacy, v).unwrap().len(),
                varuint::encode(Scheme::LengthPrefixed, v).unwrap().len()
            );
        }

        #[test]
        fn test_length_is_monotonic(a: u64, b: u64, scheme: AnyScheme) {
            let scheme = Scheme::from(scheme);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(scheme.encoded_len(lo).unwrap() <= scheme.encoded_len(hi).unwrap());
        }

        #[test]
        fn test_truncation_is_detected(scheme: AnyScheme, v: u64) {
            let scheme = Scheme::from(scheme);
            let encoded = varuint::encode(scheme, v).unwrap();
            for len in 0..encoded.len() {
                let result = varuint::decode::<u64>(scheme, &encoded[..len], 0);
                prop_assert!(
                    matches!(result, Err(Error::TruncatedInput { .. })),
                    "{}-byte prefix decoded as {:?}",
                    len,
                    result
                );
            }
        }

        #[test]
        fn test_any_bytes_any_scheme(
            scheme: AnyScheme,
            bytes in proptest::collection::vec(any::<u8>(), 0..32),
            offset in 0usize..40,
        ) {
            let scheme = Scheme::from(scheme);
            let first = varuint::decode::<u64>(scheme, &bytes, offset);
            prop_assert_eq!(first, varuint::decode::<u64>(scheme, &bytes, offset));
            if let Ok((_, size)) = first {
                prop_assert!(offset + size <= bytes.len());
            }
        }
    }
}
