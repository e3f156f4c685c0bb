#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = zenqoi::Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    // Must never panic, whatever the input
    let _ = zenqoi::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
    let _ = zenqoi::ImageInfo::from_bytes(data);
});
