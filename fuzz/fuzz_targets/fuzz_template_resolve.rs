//! Fuzz placeholder resolution with arbitrary templates and label sets.
//!
//! The first byte picks how many labels to build; the rest is split between
//! label keys and the template.
#![no_main]
use libfuzzer_sys::fuzz_target;
use palisade_faults::{Labels, template};
use serde_json::json;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let n_labels = (data[0] as usize) % 8;
    let text = String::from_utf8_lossy(&data[1..]);
    let mut words = text.split(' ');

    let mut labels = Labels::new();
    for (i, key) in words.by_ref().take(n_labels).enumerate() {
        labels.insert(key.to_owned(), json!(i));
    }
    let template: String = words.collect::<Vec<_>>().join(" ");

    // --- resolve never panics and is deterministic ---
    let resolved = template::resolve(&template, &labels);
    assert_eq!(resolved, template::resolve(&template, &labels));

    // --- without labels the template is returned unchanged ---
    assert_eq!(template::resolve(&template, &Labels::new()), template);

    // --- extracted names are real placeholders ---
    for name in template::extract_variable_names(&template) {
        assert!(template.contains(&format!("{{{name}}}")));
    }
});
