/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::process::ExitCode;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use varuint::Scheme;
use varuint_bencher::{NUM_INTEGERS, RoundtripError, WIDTHS, generate_integers, roundtrip};

fn main() -> ExitCode {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match compute_and_report_sizes() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "encoding report failed");
            ExitCode::FAILURE
        }
    }
}

/// Encode the benchmark data with both schemes and report the encoded sizes.
///
/// Fails if either scheme doesn't decode its own output back to the input.
fn compute_and_report_sizes() -> Result<(), RoundtripError> {
    for int_size_in_bytes in WIDTHS {
        let values = generate_integers(int_size_in_bytes, NUM_INTEGERS);
        let raw_size = values.len() * int_size_in_bytes;

        for scheme in Scheme::ALL {
            let encoded = roundtrip(scheme, &values)?;

            let ratio = encoded.len() as f64 / raw_size as f64;
            tracing::info!(
                %scheme,
                int_size_in_bytes,
                raw_bytes = raw_size,
                encoded_bytes = encoded.len(),
                ratio,
                "encoded {} integers",
                values.len()
            );
        }
    }

    tracing::info!("Run `cargo bench -p varuint_bencher` for timings.");
    Ok(())
}
