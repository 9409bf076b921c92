//! Fuzz Fault construction, rendering and serialization from raw bytes.
#![no_main]
use libfuzzer_sys::fuzz_target;
use palisade_faults::{
    ConversionOptions, Fault, FaultKind, NaturalFault, SerializationOptions,
};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let kind = FaultKind::ALL[data[0] as usize % FaultKind::ALL.len()];
    let flags = data[1];
    let text = String::from_utf8_lossy(&data[2..]);
    let mut parts = text.splitn(3, '|');
    let template = parts.next().unwrap_or_default();
    let key = parts.next().unwrap_or_default();
    let value = parts.next().unwrap_or_default();

    let builder = if flags & 1 == 1 {
        Fault::public_builder(kind)
    } else {
        Fault::builder(kind)
    };
    let fault = builder
        .with_retryable(flags & 2 == 2)
        .with_message_template(template)
        .with_message_template_for_audience("user", template)
        .with_label(key, value)
        .build();

    // --- rendering never panics ---
    let _ = fault.to_string();
    let _ = fault.verbose().to_string();

    // --- natural JSON always parses back ---
    let opts = SerializationOptions::new()
        .resolve_messages(flags & 4 == 4)
        .pretty_print(flags & 8 == 8);
    let json = fault.to_natural_json("", &opts).unwrap();
    let parsed: NaturalFault = serde_json::from_str(&json).unwrap();
    if !fault.is_public() {
        assert!(parsed.message.is_empty());
        assert!(parsed.labels.is_empty());
    }
    let _ = fault.to_full_json(&opts).unwrap();

    // --- conversion always yields a public Fault ---
    let public = fault.into_public("fuzz", None, &ConversionOptions::new());
    assert!(public.is_public());
});
