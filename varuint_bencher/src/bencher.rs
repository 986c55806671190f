/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use criterion::{
    BenchmarkGroup, BenchmarkId, Criterion, Throughput,
    measurement::{Measurement, WallTime},
};
use std::{hint::black_box, time::Duration};
use varuint::{Scheme, VarUIntWriter};

use crate::{generate_integers, roundtrip};

/// A helper struct for benchmarking both schemes on integers of one width.
#[derive(Debug)]
pub struct VarUIntBencher {
    /// The raw width of the test values, in bytes.
    int_size_in_bytes: usize,

    /// Test values for benchmarking.
    values: Vec<u64>,

    /// How long to run benchmarks overall.
    measurement_time: Duration,
}

impl VarUIntBencher {
    /// Creates a new `VarUIntBencher` with `num_ints` values of the given width.
    pub fn new(int_size_in_bytes: usize, num_ints: usize, measurement_time: Duration) -> Self {
        Self {
            int_size_in_bytes,
            values: generate_integers(int_size_in_bytes, num_ints),
            measurement_time,
        }
    }

    fn benchmark_group<'a>(
        &self,
        c: &'a mut Criterion,
        label: &str,
    ) -> BenchmarkGroup<'a, WallTime> {
        let mut group = c.benchmark_group(label);
        group.measurement_time(self.measurement_time);
        group.throughput(Throughput::Elements(self.values.len() as u64));
        group
    }

    /// Benchmark encoding the test values with each scheme.
    pub fn encode_group(&self, c: &mut Criterion) {
        let mut group = self.benchmark_group(c, "VarUInt Encoding");
        for scheme in Scheme::ALL {
            encode_benchmark(&mut group, scheme, self.int_size_in_bytes, &self.values);
        }
        group.finish();
    }

    /// Benchmark decoding the test values with each scheme.
    ///
    /// # Panics
    ///
    /// Panics if a scheme fails to round-trip the test values.
    pub fn decode_group(&self, c: &mut Criterion) {
        let mut group = self.benchmark_group(c, "VarUInt Decoding");
        for scheme in Scheme::ALL {
            let encoded = roundtrip(scheme, &self.values).unwrap();
            decode_benchmark(&mut group, scheme, self.int_size_in_bytes, &encoded);
        }
        group.finish();
    }
}

fn encode_benchmark<M: Measurement>(
    group: &mut BenchmarkGroup<'_, M>,
    scheme: Scheme,
    int_size_in_bytes: usize,
    values: &[u64],
) {
    let mut writer = VarUIntWriter::new(scheme, values.len() * int_size_in_bytes);
    group.bench_with_input(
        BenchmarkId::new(scheme.to_string(), int_size_in_bytes),
        values,
        |b, values| {
            b.iter(|| {
                writer.reset();
                for &value in values {
                    writer.write(black_box(value)).unwrap();
                }
                black_box(writer.bytes_len());
            })
        },
    );
}

fn decode_benchmark<M: Measurement>(
    group: &mut BenchmarkGroup<'_, M>,
    scheme: Scheme,
    int_size_in_bytes: usize,
    encoded: &[u8],
) {
    let mut decoded = Vec::new();
    group.bench_with_input(
        BenchmarkId::new(scheme.to_string(), int_size_in_bytes),
        encoded,
        |b, encoded| {
            b.iter(|| {
                decoded.clear();
                let mut position = 0;
                while position < encoded.len() {
                    let (value, size): (u64, usize) =
                        scheme.decode(black_box(encoded), position).unwrap();
                    position += size;
                    decoded.push(value);
                }
                black_box(decoded.len());
            })
        },
    );
}
