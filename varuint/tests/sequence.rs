/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use pretty_assertions::assert_eq;
use varuint::{Error, Scheme, Validation, VarUIntReader, VarUIntWriter};

#[test]
fn test_writer_tracks_count_and_length() {
    let mut writer = VarUIntWriter::new(Scheme::V1_0, 16);
    assert_eq!(writer.scheme(), Scheme::Legacy);
    assert_eq!(writer.write(1_984_385u32).unwrap(), 3);
    assert_eq!(writer.write(0u8).unwrap(), 1);
    assert_eq!(writer.count(), 2);
    assert_eq!(writer.bytes_len(), 4);
    assert_eq!(writer.bytes(), &[0x79, 0x0F, 0x81, 0x80]);
}

#[test]
fn test_writer_overflow_appends_nothing() {
    let mut writer = VarUIntWriter::new(Scheme::V1_1, 0);
    writer.write(5u8).unwrap();
    assert_eq!(
        writer.write(u128::MAX),
        Err(Error::Overflow { max_bits: 64 })
    );
    assert_eq!(writer.count(), 1);
    assert_eq!(writer.bytes(), &[0x0B]);
}

#[test]
fn test_writer_reset() {
    let mut writer = VarUIntWriter::new(Scheme::V1_1, 8);
    writer.write(1024u32).unwrap();
    writer.reset();
    assert_eq!(writer.count(), 0);
    assert_eq!(writer.bytes_len(), 0);

    writer.write(1u8).unwrap();
    assert_eq!(writer.into_inner(), vec![0x03]);
}

#[test]
fn test_reader_walks_writer_output() {
    let values = [0u64, 127, 128, 1024, 1 << 40, u64::MAX];
    for scheme in Scheme::ALL {
        let mut writer = VarUIntWriter::new(scheme, 64);
        for value in values {
            writer.write(value).unwrap();
        }

        let bytes = writer.into_inner();
        let decoded: Vec<u64> = VarUIntReader::new(scheme, &bytes)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(decoded, values, "{scheme}");
    }
}

#[test]
fn test_reader_position() {
    let bytes = [0x02, 0x10, 0x03];
    let mut reader = VarUIntReader::new(Scheme::V1_1, &bytes);
    assert_eq!(reader.remaining(), 3);
    assert_eq!(reader.read::<u16>().unwrap(), 1024);
    assert_eq!(reader.position(), 2);
    assert_eq!(reader.read::<u8>().unwrap(), 1);
    assert!(reader.is_empty());
    assert_eq!(
        reader.read::<u8>(),
        Err(Error::TruncatedInput {
            needed: 1,
            available: 0
        })
    );
}

#[test]
fn test_reader_does_not_advance_on_error() {
    // 300 followed by a truncated value.
    let bytes = [0x02, 0xAC, 0x01];
    let mut reader = VarUIntReader::new(Scheme::V1_0, &bytes);
    assert_eq!(reader.read::<u8>(), Err(Error::Overflow { max_bits: 8 }));
    assert_eq!(reader.position(), 0);
    assert_eq!(reader.read::<u16>().unwrap(), 300);
    assert_eq!(
        reader.read::<u16>(),
        Err(Error::TruncatedInput {
            needed: 2,
            available: 1
        })
    );
    assert_eq!(reader.position(), 2);
}

#[test]
fn test_iterator_stops_after_error() {
    let bytes = [0x81, 0x01];
    let mut reader = VarUIntReader::new(Scheme::V1_0, &bytes);
    assert_eq!(reader.next(), Some(Ok(1)));
    assert!(matches!(
        reader.next(),
        Some(Err(Error::TruncatedInput { .. }))
    ));
    assert_eq!(reader.next(), None);
}

#[test]
fn test_strict_reader() {
    let bytes = [0x81, 0x00, 0x82];
    let permissive: Vec<_> = VarUIntReader::new(Scheme::V1_0, &bytes).collect();
    assert_eq!(permissive, [Ok(1), Ok(2)]);

    let strict: Vec<_> =
        VarUIntReader::with_validation(Scheme::V1_0, &bytes, Validation::Strict).collect();
    assert_eq!(
        strict,
        [
            Ok(1),
            Err(Error::NonCanonicalEncoding {
                size: 2,
                canonical_size: 1
            })
        ]
    );
}
