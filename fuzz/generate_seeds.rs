#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: u32, height: u32, channels: u8) -> Vec<u8> {
    let mut out = b"qoif".to_vec();
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&[channels, 0]);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();
    let end = [0u8, 0, 0, 0, 0, 0, 0, 1];

    // 2x2 RGB: literal, diff, luma, index
    let mut rgb = header(2, 2, 3);
    rgb.extend_from_slice(&[0xfe, 0x80, 0x40, 0x20, 0x6b, 0x9f, 0x99, 0x35]);
    rgb.extend_from_slice(&end);
    fs::write(format!("{dir}/rgb_2x2.qoi"), rgb).unwrap();

    // 1x1 RGBA literal
    let mut rgba = header(1, 1, 4);
    rgba.extend_from_slice(&[0xff, 0xff, 0x00, 0x00, 0x80]);
    rgba.extend_from_slice(&end);
    fs::write(format!("{dir}/rgba_1x1.qoi"), rgba).unwrap();

    // 100x1 run-only image
    let mut runs = header(100, 1, 4);
    runs.extend_from_slice(&[0xfd, 0xe5]);
    runs.extend_from_slice(&end);
    fs::write(format!("{dir}/runs_100x1.qoi"), runs).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_magic.bin"), b"qoif").unwrap();
    fs::write(format!("{dir}/bad_magic.bin"), b"qoiF\0\0\0\x01\0\0\0\x01\x03\0").unwrap();
    fs::write(format!("{dir}/no_end.bin"), header(1, 1, 3)).unwrap();

    println!("Generated seed corpus in {dir}/");
}
