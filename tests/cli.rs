//! CLI-level round-trip check, in the style of the teacher's
//! `assert_cmd`/`tempfile`-based `cli_test.rs`. The teacher compares
//! against checked-in golden binaries produced by other known-good
//! encoders (lzhuf, lzhuf-port); this crate has no such second
//! implementation to compare against, so it instead round-trips the CLI's
//! own output through the reference decoder in `common`.

mod common;

use assert_cmd::prelude::*;
use common::reference_decode;
use lzss_core::STD_PARAMS;
use std::process::Command;

#[test]
fn compress_subcommand_round_trips_a_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("input.txt");
    let out_path = temp_dir.path().join("input.lzss");

    let original = b"I am Sam. Sam I am. I do not like this Sam I am.\n".repeat(20);
    std::fs::write(&in_path, &original)?;

    let mut cmd = Command::cargo_bin("lzss-core")?;
    cmd.arg("compress")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success();

    let compressed = std::fs::read(&out_path)?;
    assert!(compressed.len() < original.len(), "repetitive input should shrink");
    assert_eq!(reference_decode(&compressed, &STD_PARAMS), original);
    Ok(())
}

#[test]
fn compress_subcommand_accepts_custom_bit_widths() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("input.bin");
    let out_path = temp_dir.path().join("input.lzss");

    let original: Vec<u8> = (0u8..=255).cycle().take(3000).collect();
    std::fs::write(&in_path, &original)?;

    let mut cmd = Command::cargo_bin("lzss-core")?;
    cmd.arg("compress")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&out_path)
        .arg("--index-bits").arg("12")
        .arg("--length-bits").arg("5")
        .assert()
        .success();

    let compressed = std::fs::read(&out_path)?;
    let params = lzss_core::Params { index_bits: 12, length_bits: 5 };
    assert_eq!(reference_decode(&compressed, &params), original);
    Ok(())
}

#[test]
fn compress_subcommand_requires_input_and_output() {
    let mut cmd = Command::cargo_bin("lzss-core").unwrap();
    cmd.arg("compress").assert().failure();
}
