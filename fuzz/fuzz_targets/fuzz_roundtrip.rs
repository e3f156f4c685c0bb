#![no_main]
use libfuzzer_sys::fuzz_target;
use zenqoi::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let Ok(decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    let reencoded = encode_qoi(
        decoded.pixels(),
        decoded.width,
        decoded.height,
        decoded.layout,
        enough::Unstoppable,
    )
    .expect("re-encode of decoded pixels failed");
    let Ok(decoded2) = decode_qoi(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert!(decoded2.is_valid());
    assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
    assert_eq!(decoded.width, decoded2.width);
    assert_eq!(decoded.height, decoded2.height);
});
