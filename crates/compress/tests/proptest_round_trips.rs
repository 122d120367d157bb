//! Property-based round-trip tests covering the universal properties every
//! codec must satisfy: arbitrary ASCII/multi-byte text round-trips, and
//! encoding the same input twice is byte-identical.

use std::fs;

use compress::{Algorithm, Codec};
use proptest::prelude::*;

fn roundtrip_through(algo: Algorithm, text: &str) -> String {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let encoded = dir.path().join("enc.bin");
    let decoded = dir.path().join("out.txt");
    fs::write(&input, text).unwrap();

    let codec = algo.codec();
    codec.encode(&input, &encoded).unwrap();
    codec.decode(&encoded, &decoded).unwrap();

    fs::read_to_string(&decoded).unwrap()
}

proptest! {
    #[test]
    fn every_algorithm_round_trips_arbitrary_ascii(text in "[ -~]{0,200}") {
        for &algo in Algorithm::all() {
            prop_assert_eq!(roundtrip_through(algo, &text), text.clone());
        }
    }

    #[test]
    fn every_algorithm_round_trips_single_symbol_runs(c in '\u{21}'..'\u{7E}', n in 0usize..400) {
        let text: String = std::iter::repeat(c).take(n).collect();
        for &algo in Algorithm::all() {
            prop_assert_eq!(roundtrip_through(algo, &text), text.clone());
        }
    }
}

#[test]
fn every_algorithm_is_deterministic_on_a_fixed_input() {
    let text = "the quick brown fox jumps over the lazy dog";
    for &algo in Algorithm::all() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        fs::write(&input, text).unwrap();

        let codec = algo.codec();
        let out1 = dir.path().join("out1.bin");
        let out2 = dir.path().join("out2.bin");
        codec.encode(&input, &out1).unwrap();
        codec.encode(&input, &out2).unwrap();
        assert_eq!(fs::read(out1).unwrap(), fs::read(out2).unwrap(), "{} is not deterministic", algo.name());
    }
}

#[test]
fn every_algorithm_round_trips_multibyte_utf8() {
    let text = "héllo wörld \u{1F600}\u{1F600}\u{1F600} こんにちは";
    for &algo in Algorithm::all() {
        assert_eq!(roundtrip_through(algo, text), text);
    }
}
