//! Integration tests for the RLE container format and decoder errors.

use std::fs;

use compress::rle::{decode, encode};

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
fn aaaabbbc_round_trips() {
    roundtrip("aaaabbbc");
}

#[test]
fn empty_input_round_trips_to_empty_container() {
    roundtrip("");
}

#[test]
fn long_identical_run_crosses_the_127_cap_several_times() {
    roundtrip(&"x".repeat(1000));
}

#[test]
fn header_reports_the_correct_str_length() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let encoded = dir.path().join("enc.bin");
    fs::write(&input, "aaaabbbc").unwrap();
    encode(&input, &encoded).unwrap();

    let bytes = fs::read(&encoded).unwrap();
    let str_length = u64::from_le_bytes(bytes[0..8].try_into().unwrap());
    assert_eq!(str_length, 8);
}

#[test]
fn truncated_container_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let encoded = dir.path().join("enc.bin");
    fs::write(&input, "aaaabbbc").unwrap();
    encode(&input, &encoded).unwrap();

    let mut bytes = fs::read(&encoded).unwrap();
    bytes.truncate(bytes.len() - 1);
    fs::write(&encoded, bytes).unwrap();

    let out = dir.path().join("out.txt");
    assert!(decode(&encoded, &out).is_err());
}
