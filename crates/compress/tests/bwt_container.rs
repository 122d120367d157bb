//! Integration tests for the Burrows-Wheeler transform container, including
//! the documented "banana" scenario and a larger randomised input.

use std::fs;

use compress::bwt::{decode, encode};

fn roundtrip(text: &str) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let encoded = dir.path().join("enc.bin");
    let decoded = dir.path().join("out.txt");
    fs::write(&input, text).unwrap();

    encode(&input, &encoded).unwrap();
    decode(&encoded, &decoded).unwrap();

    assert_eq!(fs::read_to_string(&decoded).unwrap(), text);
}

#[test]
fn banana_round_trips() {
    roundtrip("banana");
}

#[test]
fn banana_container_matches_the_documented_last_column_and_index() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let encoded = dir.path().join("enc.bin");
    fs::write(&input, "banana").unwrap();
    encode(&input, &encoded).unwrap();

    let bytes = fs::read(&encoded).unwrap();
    let length = u64::from_le_bytes(bytes[0..8].try_into().unwrap());
    assert_eq!(length, 6);

    let last_column = &bytes[8..14];
    assert_eq!(std::str::from_utf8(last_column).unwrap(), "nnbaaa");

    let original_index = u64::from_le_bytes(bytes[14..22].try_into().unwrap());
    assert_eq!(original_index, 3);
}

#[test]
fn empty_input_round_trips_to_empty_container() {
    roundtrip("");
}

#[test]
fn ten_kib_input_round_trips_with_matching_length() {
    let text: String = (0..10 * 1024)
        .map(|i: u32| char::from_u32(32 + (i.wrapping_mul(2654435761).wrapping_add(i)) % 95).unwrap())
        .collect();

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let encoded = dir.path().join("enc.bin");
    let decoded = dir.path().join("out.txt");
    fs::write(&input, &text).unwrap();

    encode(&input, &encoded).unwrap();
    decode(&encoded, &decoded).unwrap();

    let result = fs::read_to_string(&decoded).unwrap();
    assert_eq!(result.chars().count(), text.chars().count());
    assert_eq!(result, text);
}
