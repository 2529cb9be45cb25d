#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_interchange::DocumentFormat;

/// Fuzz format detection on raw bytes, including invalid UTF-8.
fuzz_target!(|data: &[u8]| {
    let _ = DocumentFormat::detect(data);
});
