//! Property-style tests against the invariants described in the format:
//! round-trip fidelity, determinism, block capping, and reset behavior.

use fpc::{Error, Reader, Writer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn encode(values: &[f64], level: u8) -> Vec<u8> {
    let mut out = Vec::new();
    let mut w = Writer::new(&mut out, level).unwrap();
    for &v in values {
        w.write_float(v).unwrap();
    }
    w.close().unwrap();
    out
}

fn decode_all(bytes: &[u8]) -> Vec<f64> {
    let mut r = Reader::new(bytes);
    let mut out = Vec::new();
    loop {
        match r.read_float() {
            Ok(v) => out.push(v),
            Err(Error::Eof) => break,
            Err(e) => panic!("unexpected decode error: {:?}", e),
        }
    }
    out
}

fn random_values(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| match i % 11 {
            0 => 0.0,
            1 => -0.0,
            2 => f64::NAN,
            3 => f64::INFINITY,
            4 => f64::NEG_INFINITY,
            5 => f64::MIN_POSITIVE / 2.0, // subnormal
            _ => rng.gen_range(-1e12..1e12),
        })
        .collect()
}

/// Round-trip, byte-for-byte on bit patterns (so NaN payloads and signed
/// zero survive even though `f64::NAN == f64::NAN` is false).
#[test]
fn round_trip_preserves_bit_patterns_across_levels() {
    for &level in &[1u8, 3, 8, 16, 20] {
        let values = random_values(500, u64::from(level) * 7 + 1);
        let bytes = encode(&values, level);
        let decoded = decode_all(&bytes);
        assert_eq!(decoded.len(), values.len());
        for (v, d) in values.iter().zip(decoded.iter()) {
            assert_eq!(v.to_bits(), d.to_bits(), "level {}", level);
        }
    }
}

#[test]
fn encoding_is_deterministic() {
    let values = random_values(1000, 99);
    let a = encode(&values, 12);
    let b = encode(&values, 12);
    assert_eq!(a, b);
}

#[test]
fn stream_prefix_equals_level() {
    for level in [1u8, 2, 50, 63] {
        let bytes = encode(&[1.0, 2.0], level);
        assert_eq!(bytes[0], level);
    }
}

/// Walks the raw block framing (level byte + one or more 6-byte headers)
/// without going through `Reader`, to confirm the encoder actually split
/// a long stream into multiple capped blocks.
fn block_record_counts(bytes: &[u8]) -> Vec<u32> {
    let mut counts = Vec::new();
    let mut pos = 1; // skip level byte
    while pos < bytes.len() {
        let hdr = &bytes[pos..pos + 6];
        let n_rec = (hdr[0] as u32) | (hdr[1] as u32) << 8 | (hdr[2] as u32) << 16;
        let n_byte = (hdr[3] as u32) | (hdr[4] as u32) << 8 | (hdr[5] as u32) << 16;
        counts.push(n_rec);
        pos += n_byte as usize;
    }
    counts
}

#[test]
fn blocks_are_capped_at_32768_records() {
    let values = random_values(70_000, 4242);
    let bytes = encode(&values, 14);
    let counts = block_record_counts(&bytes);

    assert!(counts.len() >= 3, "expected at least 3 blocks, got {:?}", counts);
    for &n in &counts {
        assert!(n <= 32_768, "block exceeded cap: {}", n);
    }
    assert_eq!(counts[0], 32_768);
    assert_eq!(counts.iter().sum::<u32>() as usize, values.len());

    let decoded = decode_all(&bytes);
    assert_eq!(decoded.len(), values.len());
    for (v, d) in values.iter().zip(decoded.iter()) {
        assert_eq!(v.to_bits(), d.to_bits());
    }
}

#[test]
fn reset_starts_a_clean_stream_independent_of_prior_state() {
    let first = random_values(200, 1);
    let mut out1 = Vec::new();
    let mut w = Writer::new(&mut out1, 5).unwrap();
    for &v in &first {
        w.write_float(v).unwrap();
    }

    let mut out2 = Vec::new();
    let second = random_values(200, 2);
    w.reset(&mut out2, 9).unwrap();
    for &v in &second {
        w.write_float(v).unwrap();
    }
    w.close().unwrap();

    assert_eq!(out2[0], 9);
    let decoded = decode_all(&out2);
    for (v, d) in second.iter().zip(decoded.iter()) {
        assert_eq!(v.to_bits(), d.to_bits());
    }
}

#[test]
fn reader_reset_reads_a_fresh_source_from_scratch() {
    let a = encode(&random_values(50, 11), 4);
    let b = encode(&random_values(50, 12), 6);

    let mut r = Reader::new(a.as_slice());
    let _ = r.read_float().unwrap();
    r.reset(b.as_slice());

    let decoded = decode_all_from(&mut r);
    let expected = decode_all(&b);
    assert_eq!(decoded, expected);
}

fn decode_all_from(r: &mut Reader<&[u8]>) -> Vec<f64> {
    let mut out = Vec::new();
    loop {
        match r.read_float() {
            Ok(v) => out.push(v),
            Err(Error::Eof) => break,
            Err(e) => panic!("unexpected decode error: {:?}", e),
        }
    }
    out
}

#[test]
fn invalid_level_is_rejected() {
    let mut out = Vec::new();
    assert!(matches!(
        Writer::new(&mut out, 0),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn level_above_max_compression_is_rejected() {
    let mut out = Vec::new();
    assert!(matches!(
        Writer::new(&mut out, 255),
        Err(Error::InvalidArgument(_))
    ));
    assert!(Writer::new(&mut out, fpc::MAX_COMPRESSION).is_ok());
}

#[test]
fn write_bytes_requires_multiple_of_eight() {
    let mut out = Vec::new();
    let mut w = Writer::new(&mut out, 8).unwrap();
    assert!(matches!(
        w.write_bytes(&[0u8; 7]),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn read_requires_multiple_of_eight() {
    let bytes = encode(&[1.0], 4);
    let mut r = Reader::new(bytes.as_slice());
    let mut buf = [0u8; 3];
    assert!(matches!(r.read(&mut buf), Err(Error::InvalidArgument(_))));
}
