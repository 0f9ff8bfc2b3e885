//! # Run-Length Coding
//!
//! Lossless, order-preserving compaction of a word sequence into interleaved
//! `(value, run_length)` pairs. Pixel art is dominated by long flat runs; the
//! encoding only loses when the color changes on every cell, where it doubles
//! the input.

use crate::error::{Error, Result};

/// Encodes maximal runs of equal values as `[value, count, value, count, ...]`.
///
/// Empty input yields empty output, so the result length is always even and
/// is zero only for empty input.
pub fn encode(values: &[u32]) -> Vec<u32> {
    let mut encoded = Vec::new();
    let Some((&first, rest)) = values.split_first() else {
        return encoded;
    };

    let mut prev = first;
    let mut count: u32 = 1;
    for &value in rest {
        if value == prev && count < u32::MAX {
            count += 1;
        } else {
            encoded.push(prev);
            encoded.push(count);
            prev = value;
            count = 1;
        }
    }
    encoded.push(prev);
    encoded.push(count);
    encoded
}

/// Total number of values the pairs expand to.
pub fn decoded_len(pairs: &[u32]) -> Result<usize> {
    if pairs.len() % 2 != 0 {
        return Err(Error::OddRunStream { len: pairs.len() });
    }
    Ok(pairs
        .chunks_exact(2)
        .fold(0usize, |total, pair| total.saturating_add(pair[1] as usize)))
}

/// Expands `(value, count)` pairs back into the original sequence.
pub fn decode(pairs: &[u32]) -> Result<Vec<u32>> {
    let len = decoded_len(pairs)?;
    Ok(expand(pairs, len))
}

/// Like [`decode`], but rejects streams that do not expand to exactly
/// `expected` values before allocating anything.
pub fn decode_exact(pairs: &[u32], expected: usize) -> Result<Vec<u32>> {
    let actual = decoded_len(pairs)?;
    if actual != expected {
        return Err(Error::PixelCountMismatch { expected, actual });
    }
    Ok(expand(pairs, actual))
}

fn expand(pairs: &[u32], len: usize) -> Vec<u32> {
    let mut decoded = Vec::with_capacity(len);
    for pair in pairs.chunks_exact(2) {
        decoded.extend(std::iter::repeat_n(pair[0], pair[1] as usize));
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequences() {
        assert!(encode(&[]).is_empty());
        assert_eq!(decode(&[]), Ok(Vec::new()));
    }

    #[test]
    fn single_run_is_one_pair() {
        assert_eq!(encode(&[7; 64]), vec![7, 64]);
    }

    #[test]
    fn runs_are_emitted_in_encounter_order() {
        let input = [1, 1, 2, 3, 3, 3, 1];
        assert_eq!(encode(&input), vec![1, 2, 2, 1, 3, 3, 1, 1]);
    }

    #[test]
    fn alternating_values_double_in_size() {
        let input: Vec<u32> = (0..10).map(|i| i % 2).collect();
        assert_eq!(encode(&input).len(), 20);
    }

    #[test]
    fn decode_inverts_encode() {
        let samples: [&[u32]; 5] = [
            &[0],
            &[u32::MAX, u32::MAX, 0],
            &[5, 4, 3, 2, 1],
            &[0xFFFF_0000; 17],
            &[1, 2, 2, 1, 1, 1, 2],
        ];
        for input in samples {
            let encoded = encode(input);
            assert_eq!(encoded.len() % 2, 0);
            assert_eq!(decode(&encoded).unwrap(), input);
        }
    }

    #[test]
    fn odd_stream_is_rejected() {
        assert_eq!(decode(&[1, 2, 3]), Err(Error::OddRunStream { len: 3 }));
    }

    #[test]
    fn zero_count_runs_expand_to_nothing() {
        assert_eq!(decode(&[9, 0, 4, 2]), Ok(vec![4, 4]));
    }

    #[test]
    fn decode_exact_checks_the_total() {
        assert_eq!(decode_exact(&[1, 3], 3), Ok(vec![1, 1, 1]));
        assert_eq!(
            decode_exact(&[1, 3], 4),
            Err(Error::PixelCountMismatch {
                expected: 4,
                actual: 3
            })
        );
    }
}
